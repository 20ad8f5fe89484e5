//! Transport configuration types.

use serde::{Deserialize, Serialize};
#[cfg(not(feature = "http"))]
use tracing::warn;

/// `[server] mode` value that selects the HTTP transport.
pub const HTTP_MODE: &str = "http";

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Select the transport for a `[server] mode` value.
    ///
    /// `"http"` listens on 127.0.0.1:8000; anything else, including an empty
    /// mode, uses the default transport.
    pub fn from_mode(mode: &str) -> Self {
        if mode == HTTP_MODE {
            #[cfg(feature = "http")]
            return Self::Http(HttpConfig::default());

            #[cfg(not(feature = "http"))]
            warn!(
                "HTTP mode requested but the http feature is disabled, using the default transport"
            );
        }

        Self::default()
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_other_modes_use_stdio() {
        assert!(TransportConfig::from_mode("").is_stdio());
        assert!(TransportConfig::from_mode("stdio").is_stdio());
        assert!(TransportConfig::from_mode("HTTP").is_stdio());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_mode_binds_fixed_address() {
        match TransportConfig::from_mode("http") {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.host, "127.0.0.1");
                assert_eq!(cfg.port, 8000);
                assert_eq!(cfg.rpc_path, "/mcp");
            }
            #[allow(unreachable_patterns)]
            other => panic!("expected HTTP transport, got {:?}", other),
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_description() {
        assert_eq!(
            TransportConfig::http(9000, "0.0.0.0").description(),
            "HTTP on 0.0.0.0:9000/mcp"
        );
    }
}
