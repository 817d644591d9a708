//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. The only capability exposed is the tool router built in
//! `domains/tools/router.rs`; argument validation against each tool's schema
//! happens in the route before any tool logic runs.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use crate::domains::generation::{OpenAiGenerator, SharedGenerator};
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// The main MCP server handler.
///
/// Cloned once per session by the TCP transport; clones share the
/// configuration and the generation client.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// The OpenAI client is built here from the configured credential. A
    /// missing credential is not an error; tool calls report it instead.
    pub fn new(config: Config) -> super::error::Result<Self> {
        config.validate()?;

        let generator = OpenAiGenerator::from_config(&config)?
            .map(|generator| Arc::new(generator) as SharedGenerator);

        if generator.is_none() {
            warn!("No generation client configured");
        }

        Ok(Self::with_generator(config, generator))
    }

    /// Create a server around an already-built generation client.
    pub fn with_generator(config: Config, generator: Option<SharedGenerator>) -> Self {
        let config = Arc::new(config);

        info!("Registered tools: {}", ToolRegistry::tool_names().join(", "));

        Self {
            tool_router: build_tool_router::<Self>(config.clone(), generator),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Generates HTML pages. Call make-html-page with a detailed description \
                 and the absolute path the page should be saved to."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_new_without_credential() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "mcp-html-maker");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_new_with_credential() {
        let mut config = Config::default();
        config.credentials.openai_api_key = Some("sk-test".to_string());
        assert!(McpServer::new(config).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.security.root_path = Some(PathBuf::from("/definitely/not/a/real/dir"));
        assert!(matches!(
            McpServer::new(config),
            Err(crate::core::Error::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = Config::default();
        config.credentials.openai_api_key = Some("sk-test".to_string());
        config.generation.base_url = "api.openai.com/".to_string();
        assert!(matches!(
            McpServer::new(config),
            Err(crate::core::Error::Generation(_))
        ));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_router_lists_registered_tools() {
        let server = McpServer::with_generator(Config::default(), None);
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), ToolRegistry::get_all_tools().len());
        assert_eq!(tools[0].name.as_ref(), "make-html-page");
    }
}
