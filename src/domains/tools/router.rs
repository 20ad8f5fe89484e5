//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Only tools present in the registry get a route, so clients never see a
//! tool whose service is not configured.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::error::ToolError;
use super::handlers::ToolOutput;
use super::registry::{ToolDescriptor, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor.clone()))
        })
}

/// Create a ToolRoute for STDIO transport.
fn create_route<S>(descriptor: Arc<ToolDescriptor>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(descriptor.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let descriptor = descriptor.clone();
        async move {
            descriptor
                .call(args)
                .await
                .map(ToolOutput::into_call_result)
                .map_err(to_mcp_error)
        }
        .boxed()
    })
}

fn to_mcp_error(err: ToolError) -> McpError {
    McpError::invalid_params(err.to_string(), None)
}
