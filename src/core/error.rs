//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for the edges of the server:
//! configuration loading, client construction, and the transports. Upstream
//! HTTP failures never surface here; the retrieval client turns them into
//! text lines instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// I/O errors from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
