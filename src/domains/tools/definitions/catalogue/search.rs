//! Catalogue search tools.
//!
//! The same request shape serves both the main catalogue and the article
//! index; only the configured base URL and the tool name differ.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{
    LIMIT_PARAM, LOOKFOR_PARAM, OFFSET_PARAM, ParamSpec, default_limit, default_offset,
    default_wildcard,
};
use crate::core::client::LineClient;

/// Parameters for the search tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Offset into the result list.
    #[schemars(description = "Offset into the result list (default: 0)")]
    #[serde(default = "default_offset")]
    pub offset: i64,

    /// Maximum number of results.
    #[schemars(description = "Maximum number of results (default: 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Search terms.
    #[schemars(description = "Search terms (default: * for everything)")]
    #[serde(default = "default_wildcard")]
    pub lookfor: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
            lookfor: default_wildcard(),
        }
    }
}

/// Search against a catalogue search API.
pub struct SearchTool;

impl SearchTool {
    /// Name of the catalogue search tool.
    pub const CATALOGUE_NAME: &'static str = "search_literature";

    /// Name of the article search tool.
    pub const ARTICLE_NAME: &'static str = "search_article";

    pub const CATALOGUE_DESCRIPTION: &'static str = "Search the library catalogue. Returns the raw search API response as lines of text.";

    pub const ARTICLE_DESCRIPTION: &'static str = "Search the library catalogue for articles. Returns the raw search API response as lines of text.";

    /// The search URL is used as configured, without an extra path.
    pub const ENDPOINT: &'static str = "";

    /// Parameters in the order they are declared to clients.
    pub const PARAMS: &'static [ParamSpec] = &[OFFSET_PARAM, LIMIT_PARAM, LOOKFOR_PARAM];

    /// Query string for a search, in request order.
    pub fn query(params: &SearchParams) -> Vec<(&'static str, String)> {
        vec![
            ("lookfor", params.lookfor.clone()),
            ("offset", params.offset.to_string()),
            ("limit", params.limit.to_string()),
        ]
    }

    /// Run a search against `base_url`.
    pub async fn execute(
        params: &SearchParams,
        base_url: &str,
        endpoint: &str,
        client: &LineClient,
    ) -> Vec<String> {
        info!("Catalogue search for '{}'", params.lookfor);
        client
            .fetch_lines(base_url, endpoint, &Self::query(params))
            .await
    }
}
