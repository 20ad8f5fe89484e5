//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! The set of tools is decided once, when the server is built: the registry
//! registers one tool per configured service URL, and the rmcp ToolRouter is
//! built from that registry. Both transports dispatch through the same
//! descriptors.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::client::LineClient;
use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_tool_router};

const INSTRUCTIONS: &str = "Library catalogue server. Search the catalogue and the article index, \
     look up the local availability of a document by PPN, and build links to record pages. \
     Only tools for configured services are available.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap; the registry and configuration are shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tools enabled by the configuration.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let client = Arc::new(LineClient::new(config.client.timeout())?);
        Ok(Self::with_client(config, client))
    }

    /// Create a server whose tools use `client` for upstream requests.
    pub fn with_client(config: Config, client: Arc<LineClient>) -> Self {
        let registry = Arc::new(ToolRegistry::from_settings(&config.services, client));
        info!("{} tool(s) enabled: {:?}", registry.len(), registry.tool_names());

        Self {
            tool_router: build_tool_router::<Self>(&registry),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be an object".to_string()),
        };

        let result = self
            .registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.config.server.name.clone();
        info.server_info.version = self.config.server.version.clone();
        info
    }
}
