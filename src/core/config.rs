//! Configuration management for the MCP server.
//!
//! Service endpoints come from a TOML file with `[catalogue]`,
//! `[availability]` and `[server]` tables. Process-level settings (server
//! name, log level, request timeout) come from environment variables; the
//! binary loads `.env` through `dotenvy` before calling [`Config::load`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::Result;
use super::transport::{HTTP_MODE, TransportConfig};

/// Default configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default timeout for upstream requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Upstream request settings.
    pub client: ClientConfig,

    /// Catalogue and availability endpoints.
    pub services: ServiceSettings,

    /// Transport configuration, derived from `services.server_mode`.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl LoggingConfig {
    /// Read the log level from `MCP_LOG_LEVEL`, defaulting to "info".
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Settings for the upstream HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Endpoint settings read from the configuration file.
///
/// Every field is either a base URL (or URL prefix for the frontend
/// templates) or empty. An empty field disables the tool it governs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// `[catalogue] base_url`: catalogue search API.
    pub catalogue_search_url: String,

    /// `[catalogue] base_url_articles`: article search API.
    pub article_search_url: String,

    /// `[availability] base_url`: DAIA availability service.
    pub availability_url: String,

    /// `[catalogue] frontend_url`: prefix for catalogue record links.
    pub catalogue_frontend_url_template: String,

    /// `[catalogue] frontend_url_articles`: prefix for article record links.
    pub article_frontend_url_template: String,

    /// `[server] mode`: `"http"` selects the HTTP transport.
    pub server_mode: String,
}

impl ServiceSettings {
    /// Load settings from `path`, falling back to empty settings on any error.
    ///
    /// A missing file is expected and only logged at info level. Unreadable
    /// or malformed files are logged as warnings.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring config file '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields empty settings. Read and parse failures are
    /// returned as errors.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config file found at '{}', using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        Self::from_toml_str(&raw)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let table: toml::Table = raw.parse()?;
        let mut settings = Self::default();
        settings.apply(&table);
        Ok(settings)
    }

    fn apply(&mut self, table: &toml::Table) {
        let fields: [(&str, &str, &mut String); 6] = [
            ("catalogue", "base_url", &mut self.catalogue_search_url),
            ("catalogue", "base_url_articles", &mut self.article_search_url),
            ("catalogue", "frontend_url", &mut self.catalogue_frontend_url_template),
            ("catalogue", "frontend_url_articles", &mut self.article_frontend_url_template),
            ("availability", "base_url", &mut self.availability_url),
            ("server", "mode", &mut self.server_mode),
        ];

        for (group, key, field) in fields {
            let Some(section) = table.get(group) else {
                continue;
            };
            let Some(section) = section.as_table() else {
                warn!("{} is not a table, ignoring {}.{}", group, group, key);
                continue;
            };
            let Some(value) = section.get(key) else {
                continue;
            };
            match value.as_str() {
                Some(value) => {
                    info!("{}.{} set", group, key);
                    *field = value.to_string();
                }
                None => warn!("{}.{} is not a string, ignoring it", group, key),
            }
        }

        debug!(settings = ?self, "Service settings loaded");
    }

    /// Whether the HTTP transport was requested.
    pub fn wants_http(&self) -> bool {
        self.server_mode == HTTP_MODE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "catalogue-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            client: ClientConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            services: ServiceSettings::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration around already loaded service settings.
    pub fn with_services(services: ServiceSettings) -> Self {
        Self {
            transport: TransportConfig::from_mode(&services.server_mode),
            services,
            ..Self::default()
        }
    }

    /// Load the full configuration: service settings from `path`, everything
    /// else from the environment.
    ///
    /// Environment variables are prefixed with `MCP_`:
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_HTTP_TIMEOUT_SECS`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let mut config = Self::with_services(ServiceSettings::load(path));

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        if let Ok(timeout) = std::env::var("MCP_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.client.timeout_secs = secs,
                _ => warn!(
                    "Invalid MCP_HTTP_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const FULL_CONFIG: &str = r#"
[catalogue]
base_url = "https://katalog.example.org/api/v1/search"
base_url_articles = "https://katalog.example.org/api/v1/articles"
frontend_url = "https://katalog.example.org/Record/"
frontend_url_articles = "https://katalog.example.org/Search2Record/"

[availability]
base_url = "https://daia.example.org"

[server]
mode = "http"
"#;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let settings = ServiceSettings::load(write_config(&dir, FULL_CONFIG));

        assert_eq!(
            settings.catalogue_search_url,
            "https://katalog.example.org/api/v1/search"
        );
        assert_eq!(
            settings.article_search_url,
            "https://katalog.example.org/api/v1/articles"
        );
        assert_eq!(
            settings.catalogue_frontend_url_template,
            "https://katalog.example.org/Record/"
        );
        assert_eq!(
            settings.article_frontend_url_template,
            "https://katalog.example.org/Search2Record/"
        );
        assert_eq!(settings.availability_url, "https://daia.example.org");
        assert_eq!(settings.server_mode, "http");
        assert!(settings.wants_http());
    }

    #[test]
    fn test_missing_file_yields_empty_settings() {
        let dir = TempDir::new().unwrap();
        let settings = ServiceSettings::load(dir.path().join("does-not-exist.toml"));
        assert_eq!(settings, ServiceSettings::default());
    }

    #[test]
    fn test_empty_file_yields_empty_settings() {
        let dir = TempDir::new().unwrap();
        let settings = ServiceSettings::load(write_config(&dir, ""));
        assert_eq!(settings, ServiceSettings::default());
    }

    #[test]
    fn test_missing_keys_stay_empty() {
        let dir = TempDir::new().unwrap();
        let settings = ServiceSettings::load(write_config(
            &dir,
            "[availability]\nbase_url = \"https://daia.example.org\"\n",
        ));

        assert_eq!(settings.availability_url, "https://daia.example.org");
        assert!(settings.catalogue_search_url.is_empty());
        assert!(settings.article_search_url.is_empty());
        assert!(settings.catalogue_frontend_url_template.is_empty());
        assert!(settings.article_frontend_url_template.is_empty());
        assert!(settings.server_mode.is_empty());
        assert!(!settings.wants_http());
    }

    #[test]
    fn test_unknown_groups_and_keys_are_ignored() {
        let settings = ServiceSettings::from_toml_str(
            "[catalogue]\nbase_url = \"https://a\"\nsomething_else = \"x\"\n\n[other]\nkey = 1\n",
        )
        .unwrap();
        assert_eq!(settings.catalogue_search_url, "https://a");
    }

    #[test]
    fn test_non_string_value_is_ignored() {
        let settings =
            ServiceSettings::from_toml_str("[server]\nmode = 8000\n[catalogue]\nbase_url = \"u\"\n")
                .unwrap();
        assert!(settings.server_mode.is_empty());
        assert_eq!(settings.catalogue_search_url, "u");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[catalogue\nbase_url = ");

        assert!(matches!(
            ServiceSettings::try_load(&path),
            Err(Error::Toml(_))
        ));
        assert_eq!(ServiceSettings::load(&path), ServiceSettings::default());
    }

    #[test]
    fn test_group_that_is_not_a_table_is_ignored() {
        let settings = ServiceSettings::from_toml_str("catalogue = \"https://a\"\n").unwrap();
        assert_eq!(settings, ServiceSettings::default());
    }

    #[test]
    fn test_bad_group_keeps_other_groups() {
        let dir = TempDir::new().unwrap();
        let settings = ServiceSettings::load(write_config(
            &dir,
            "availability = \"x\"\n[catalogue]\nbase_url = \"https://a\"\n",
        ));

        assert_eq!(settings.catalogue_search_url, "https://a");
        assert!(settings.availability_url.is_empty());
    }

    #[test]
    fn test_config_load_reads_services_and_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, FULL_CONFIG);

        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "test-catalogue");
            std::env::set_var("MCP_HTTP_TIMEOUT_SECS", "9");
        }
        let config = Config::load(&path);
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
            std::env::remove_var("MCP_HTTP_TIMEOUT_SECS");
        }

        assert_eq!(config.server.name, "test-catalogue");
        assert_eq!(config.client.timeout(), Duration::from_secs(9));
        assert_eq!(config.services.availability_url, "https://daia.example.org");
    }

    #[test]
    fn test_invalid_timeout_env_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_HTTP_TIMEOUT_SECS", "soon");
        }
        let config = Config::load("/nonexistent/config.toml");
        unsafe {
            std::env::remove_var("MCP_HTTP_TIMEOUT_SECS");
        }

        assert_eq!(config.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.client.timeout_secs, 5);
        assert_eq!(config.services, ServiceSettings::default());
    }
}
