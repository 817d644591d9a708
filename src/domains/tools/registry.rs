//! Tool Registry - the capabilities this server advertises.

use rmcp::model::Tool;

use super::definitions::MakeHtmlPageTool;

/// Tool registry - lists all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![MakeHtmlPageTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![MakeHtmlPageTool::to_tool()]
    }
}
