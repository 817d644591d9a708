//! `make-html-page` tool definition.
//!
//! Generates an HTML page from a natural-language description and saves it
//! to the requested path. One invocation performs one provider call and one
//! file write; any failure is returned as an error result with the failure's
//! text and never takes the server down.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::persist::write_page;
use super::prompt::build_page_prompt;
use crate::core::config::{Config, OPENAI_API_KEY_ENV};
use crate::core::security::validate_output_path;
use crate::domains::generation::{SharedGenerator, TextGenerator};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the make-html-page tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MakeHtmlPageParams {
    /// A detailed description of the HTML page to generate
    pub description: String,

    /// Absolute file path where the HTML should be saved
    pub file_path: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Make HTML page tool - generates a page with the provider and writes it to disk.
pub struct MakeHtmlPageTool;

impl MakeHtmlPageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "make-html-page";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate an HTML page using an OpenAI model and save it to a file path";

    /// Execute the tool logic.
    ///
    /// `generator` is `None` when no credential was configured at startup.
    #[instrument(skip_all, fields(file_path = %params.file_path))]
    pub async fn execute(
        params: &MakeHtmlPageParams,
        config: &Config,
        generator: Option<&dyn TextGenerator>,
    ) -> CallToolResult {
        info!(
            "Make HTML page tool called ({} chars of description)",
            params.description.len()
        );

        match Self::generate_and_save(params, config, generator).await {
            Ok(()) => {
                info!("HTML page saved to '{}'", params.file_path);
                CallToolResult::success(vec![Content::text(format!(
                    "Success: HTML page generated and saved to {}",
                    params.file_path
                ))])
            }
            Err(e) => {
                warn!("Make HTML page failed: {}", e);
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    async fn generate_and_save(
        params: &MakeHtmlPageParams,
        config: &Config,
        generator: Option<&dyn TextGenerator>,
    ) -> Result<(), ToolError> {
        let generator = generator.ok_or(ToolError::MissingCredential(OPENAI_API_KEY_ENV))?;

        let target = validate_output_path(&params.file_path, &config.security)?;

        let prompt = build_page_prompt(&params.description);
        let html = generator.generate(&prompt).await?;
        info!("Generated {} bytes of HTML", html.len());

        tokio::task::spawn_blocking(move || write_page(&target, &html))
            .await
            .map_err(|e| ToolError::internal(format!("page writer task failed: {}", e)))??;

        Ok(())
    }

    /// Deserialize raw call arguments, rejecting missing or mistyped fields.
    pub fn parse_params(arguments: JsonObject) -> Result<MakeHtmlPageParams, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MakeHtmlPageParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Handle one raw `tools/call` for this tool.
    ///
    /// Malformed arguments are a protocol error (`invalid_params`) and never
    /// reach the provider; everything after that is reported in the result.
    pub async fn handle_call(
        arguments: Option<JsonObject>,
        config: Arc<Config>,
        generator: Option<SharedGenerator>,
    ) -> Result<CallToolResult, McpError> {
        let params = Self::parse_params(arguments.unwrap_or_default())?;
        Ok(Self::execute(&params, &config, generator.as_deref()).await)
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(config: Arc<Config>, generator: Option<SharedGenerator>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            Self::handle_call(ctx.arguments.clone(), config.clone(), generator.clone()).boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
