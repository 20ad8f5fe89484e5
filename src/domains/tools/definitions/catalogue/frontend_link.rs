//! Catalogue frontend link tools.
//!
//! Builds a link to a record page by appending the PPN to a configured URL
//! prefix. No request is made.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{PPN_PARAM, ParamSpec, default_wildcard};

/// Parameters for the frontend link tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FrontendLinkParams {
    /// PPN of the record.
    #[schemars(description = "PPN (record identifier) to link to")]
    #[serde(default = "default_wildcard")]
    pub ppn: String,
}

/// Link builder for catalogue and article record pages.
pub struct FrontendLinkTool;

impl FrontendLinkTool {
    /// Name of the catalogue record link tool.
    pub const CATALOGUE_NAME: &'static str = "frontend_link";

    /// Name of the article record link tool.
    pub const ARTICLE_NAME: &'static str = "frontend_link_article";

    pub const CATALOGUE_DESCRIPTION: &'static str =
        "Return the catalogue frontend link for a given PPN.";

    pub const ARTICLE_DESCRIPTION: &'static str =
        "Return the catalogue frontend link for a given article PPN.";

    /// Parameters in the order they are declared to clients.
    pub const PARAMS: &'static [ParamSpec] = &[PPN_PARAM];

    /// `template` followed by `ppn`, verbatim.
    pub fn link(template: &str, ppn: &str) -> String {
        format!("{template}{ppn}")
    }
}
