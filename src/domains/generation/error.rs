//! Generation-specific error types.

use thiserror::Error;

/// Errors returned by a [`TextGenerator`](super::TextGenerator).
///
/// Display text is what the caller of the tool eventually sees.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The client could not be constructed from its configuration.
    #[error("generation client not configured: {0}")]
    Configuration(String),

    /// Network-level failure (connect, timeout, interrupted body).
    #[error("{0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("OpenAI returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The provider answered with a body that could not be understood.
    #[error("{0}")]
    Response(String),
}

impl GenerationError {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new response error.
    pub fn response(msg: impl Into<String>) -> Self {
        Self::Response(msg.into())
    }
}
