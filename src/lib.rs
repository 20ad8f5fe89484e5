//! Library catalogue MCP server.
//!
//! Exposes catalogue search, article search, DAIA availability lookups and
//! frontend record links as MCP tools. Each tool is only offered when the
//! service it needs is configured.
//!
//! # Architecture
//!
//! - **core**: configuration, the line-oriented HTTP client, error handling,
//!   the server handler and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the catalogue tools and their registration
//!
//! # Example
//!
//! ```rust,no_run
//! use catalogue_mcp_server::core::{Config, run};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml");
//!     run(config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, LineClient, McpServer, Result, ServiceSettings};
