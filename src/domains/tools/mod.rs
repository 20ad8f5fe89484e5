//! Tools domain module.
//!
//! This module handles the catalogue tools exposed to MCP clients. Which
//! tools exist depends on the configured service URLs.
//!
//! ## Architecture
//!
//! - `definitions/` - Parameters and request logic per tool
//! - `registry.rs` - Capability table, registration, and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `handlers.rs` - Conversion of tool output to MCP results
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/catalogue/`
//! 2. Define its params struct, name, description and request logic
//! 3. Add a `ToolKind` variant if the request shape is new
//! 4. Add a row to `CAPABILITIES` in `registry.rs` with its governing setting

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::ToolOutput;
pub use registry::{
    CAPABILITIES, Capability, SettingsField, ToolDescriptor, ToolKind, ToolRegistry, register_all,
};
pub use router::build_tool_router;
