//! OpenAI chat completions client.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{GenerationError, TextGenerator};
use crate::core::config::{Config, GenerationConfig};

/// [`TextGenerator`] backed by `POST {base_url}v1/chat/completions`.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiGenerator {
    /// Build a client for the given provider settings and credential.
    pub fn new(
        config: &GenerationConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let base_url = config.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GenerationError::configuration(
                "OpenAI base URL must start with http:// or https://",
            ));
        }

        let endpoint = if base_url.ends_with('/') {
            format!("{}v1/chat/completions", base_url)
        } else {
            format!("{}/v1/chat/completions", base_url)
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                GenerationError::configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from the server configuration.
    ///
    /// Returns `Ok(None)` when no credential is configured; the tool reports
    /// that on each call instead of the server refusing to start.
    pub fn from_config(config: &Config) -> Result<Option<Self>, GenerationError> {
        config
            .credentials
            .openai_api_key
            .as_deref()
            .map(|key| Self::new(&config.generation, key))
            .transpose()
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::transport("OpenAI request timed out")
                } else {
                    GenerationError::transport(format!("OpenAI request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            GenerationError::transport(format!("failed to read OpenAI response: {}", e))
        })?;
        debug!("OpenAI responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&body).map_err(|e| {
            GenerationError::response(format!("failed to decode OpenAI response: {}", e))
        })?;

        extract_text(parsed)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// First choice's content. A choice without content yields empty text.
fn extract_text(response: ChatCompletionResponse) -> Result<String, GenerationError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::response("OpenAI response contained no choices"))?;

    Ok(choice
        .message
        .and_then(|message| message.content)
        .unwrap_or_default())
}

/// Prefer the provider's `error.message`, falling back to the raw body.
fn provider_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}
