//! Tool output handling.
//!
//! Network-backed tools produce a list of lines, link tools a single string.
//! Both are converted to an MCP `CallToolResult` here, so the router and the
//! HTTP transport share one representation.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// Lines returned by an upstream service, or a single diagnostic line.
    Lines(Vec<String>),

    /// A single string, such as a frontend link.
    Text(String),
}

impl ToolOutput {
    /// Convert into the MCP result sent to the client.
    ///
    /// Lines are sent as structured content under `result`, mirrored as JSON
    /// text for clients that only read text content.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Lines(lines) => {
                CallToolResult::structured(serde_json::json!({ "result": lines }))
            }
            Self::Text(text) => CallToolResult::success(vec![Content::text(text)]),
        }
    }

    /// The lines of a line result, if this is one.
    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Self::Lines(lines) => Some(lines),
            Self::Text(_) => None,
        }
    }
}
