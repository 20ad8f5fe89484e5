//! Library catalogue tools module.
//!
//! - `availability`: DAIA holdings and availability lookup
//! - `search`: catalogue and article search
//! - `frontend_link`: links to record pages in the catalogue frontend

pub mod availability;
pub mod common;
pub mod frontend_link;
pub mod search;

pub use availability::{AvailabilityParams, AvailabilityTool};
pub use common::{ParamDefault, ParamSpec, ParamType};
pub use frontend_link::{FrontendLinkParams, FrontendLinkTool};
pub use search::{SearchParams, SearchTool};
