//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration loading, the upstream HTTP client, error handling, the
//! server handler, and the transport layer.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use client::LineClient;
pub use config::{Config, ServiceSettings};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService, run};
