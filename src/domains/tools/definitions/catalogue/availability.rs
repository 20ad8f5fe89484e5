//! DAIA availability lookup tool.
//!
//! Asks the configured DAIA service where a record is held and whether it
//! can be borrowed. The DAIA JSON is returned line by line, unparsed.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{
    LIMIT_PARAM, OFFSET_PARAM, PPN_PARAM, ParamSpec, default_limit, default_offset,
    default_wildcard,
};
use crate::core::client::LineClient;

/// Parameters for the availability tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AvailabilityParams {
    /// Offset into the holdings list.
    #[schemars(description = "Offset into the holdings list (default: 0)")]
    #[serde(default = "default_offset")]
    pub offset: i64,

    /// Maximum number of holdings to return.
    #[schemars(description = "Maximum number of holdings (default: 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// PPN of the record.
    #[schemars(description = "PPN (record identifier) of the document")]
    #[serde(default = "default_wildcard")]
    pub ppn: String,
}

impl Default for AvailabilityParams {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
            ppn: default_wildcard(),
        }
    }
}

/// Availability lookup against a DAIA endpoint.
pub struct AvailabilityTool;

impl AvailabilityTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_availability";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the local availability of a document, identified by its PPN, from the library's DAIA service. Returns the raw DAIA JSON response as lines of text.";

    /// Path appended to the configured availability URL.
    pub const ENDPOINT: &'static str = "daia";

    /// Parameters in the order they are declared to clients.
    pub const PARAMS: &'static [ParamSpec] = &[OFFSET_PARAM, LIMIT_PARAM, PPN_PARAM];

    /// Query string for a lookup, in request order.
    pub fn query(params: &AvailabilityParams) -> Vec<(&'static str, String)> {
        vec![
            ("id", format!("ppn:{}", params.ppn)),
            ("format", "json".to_string()),
            ("offset", params.offset.to_string()),
            ("limit", params.limit.to_string()),
        ]
    }

    /// Look up availability for `params.ppn`.
    pub async fn execute(
        params: &AvailabilityParams,
        base_url: &str,
        endpoint: &str,
        client: &LineClient,
    ) -> Vec<String> {
        info!("Availability lookup for ppn {}", params.ppn);
        client
            .fetch_lines(base_url, endpoint, &Self::query(params))
            .await
    }
}
