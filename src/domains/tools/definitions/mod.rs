//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod catalogue;

pub use catalogue::{
    AvailabilityParams, AvailabilityTool, FrontendLinkParams, FrontendLinkTool, ParamDefault,
    ParamSpec, ParamType, SearchParams, SearchTool,
};
