//! Tool-specific error types.

use thiserror::Error;

use super::definitions::html::PersistError;
use crate::core::security::PathSecurityError;
use crate::domains::generation::GenerationError;

/// Errors that can occur while executing a tool call.
///
/// Every variant is turned into an error result carrying its display text;
/// none of them abort the server.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The generation credential is not configured.
    #[error("{0} environment variable is required")]
    MissingCredential(&'static str),

    /// The requested output path was rejected by path security.
    #[error("Path security validation failed: {0}")]
    PathRejected(#[from] PathSecurityError),

    /// The generation provider failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Writing the result to disk failed.
    #[error(transparent)]
    Persistence(#[from] PersistError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
