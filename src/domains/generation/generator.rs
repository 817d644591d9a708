use std::sync::Arc;

use async_trait::async_trait;

use super::GenerationError;

/// A text-generation provider: prompt in, generated text out.
///
/// Implementations must not retry; a failure is reported to the tool caller
/// as-is.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt using the provider's default settings.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Generator handle shared between the server and its tool routes.
pub type SharedGenerator = Arc<dyn TextGenerator>;
