//! Transport layer for the MCP server.
//!
//! This module provides the transport implementations:
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **HTTP**: HTTP server with JSON-RPC over POST requests - feature: `http`
//!
//! The transport is chosen by the `[server] mode` setting: `"http"` selects
//! HTTP, anything else STDIO.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::{HTTP_MODE, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::{TransportService, run};

#[cfg(feature = "http")]
pub use config::HttpConfig;
