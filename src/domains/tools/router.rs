//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module wires them up
//! with the shared configuration and generation client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::MakeHtmlPageTool;
use crate::core::config::Config;
use crate::domains::generation::SharedGenerator;

/// Build the tool router with all registered tools.
///
/// `generator` is `None` when no credential is configured.
pub fn build_tool_router<S>(config: Arc<Config>, generator: Option<SharedGenerator>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(MakeHtmlPageTool::create_route(config, generator))
}
