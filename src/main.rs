//! MCP Server Entry Point
//!
//! Parses the command line, initializes logging, loads configuration, and
//! starts the server with the transport selected by `[server] mode`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use catalogue_mcp_server::core::config::{DEFAULT_CONFIG_PATH, LoggingConfig};
use catalogue_mcp_server::core::{Config, run};

/// Library catalogue MCP server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, env = "MCP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging comes first so the config loader can report what it found
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::load(&cli.config);

    info!("Starting {} v{}", config.server.name, config.server.version);

    run(config).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
