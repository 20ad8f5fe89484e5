//! Common utilities shared across catalogue tools.
//!
//! Parameter defaults live here so the serde defaults, the published
//! parameter specs, and the JSON schemas all agree.

use serde::Serialize;

/// Default result offset.
pub const DEFAULT_OFFSET: i64 = 0;

/// Default number of results requested from upstream.
pub const DEFAULT_LIMIT: i64 = 100;

/// Wildcard used when no search term or PPN is given.
pub const WILDCARD: &str = "*";

pub fn default_offset() -> i64 {
    DEFAULT_OFFSET
}

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

pub fn default_wildcard() -> String {
    WILDCARD.to_string()
}

/// Type of a tool parameter as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Integer,
    String,
}

/// Default value of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamDefault {
    Integer(i64),
    String(&'static str),
}

/// One entry of a tool's ordered parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub default: ParamDefault,
}

impl ParamSpec {
    pub const fn integer(name: &'static str, default: i64) -> Self {
        Self {
            name,
            param_type: ParamType::Integer,
            default: ParamDefault::Integer(default),
        }
    }

    pub const fn string(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            param_type: ParamType::String,
            default: ParamDefault::String(default),
        }
    }
}

pub const OFFSET_PARAM: ParamSpec = ParamSpec::integer("offset", DEFAULT_OFFSET);
pub const LIMIT_PARAM: ParamSpec = ParamSpec::integer("limit", DEFAULT_LIMIT);
pub const PPN_PARAM: ParamSpec = ParamSpec::string("ppn", WILDCARD);
pub const LOOKFOR_PARAM: ParamSpec = ParamSpec::string("lookfor", WILDCARD);
