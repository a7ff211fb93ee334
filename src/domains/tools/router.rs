//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! One route per registered tool. Every route dispatches through
//! [`ToolRegistry::call`], so the router can never drift from the registry.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
///
/// `flag_errors` marks replies that carry a diagnostic sentence as tool
/// errors (`isError: true`); otherwise every reply is a plain success.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>, flag_errors: bool) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .descriptors()
        .fold(ToolRouter::new(), |router, descriptor| {
            let name = descriptor.name().to_string();
            let registry = registry.clone();

            router.with_route(ToolRoute::new_dyn(
                descriptor.tool().clone(),
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let registry = registry.clone();
                    let name = name.clone();
                    async move {
                        let reply = registry
                            .call(&name, args)
                            .await
                            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                        Ok(reply.into_call_result(flag_errors))
                    }
                    .boxed()
                },
            ))
        })
}
