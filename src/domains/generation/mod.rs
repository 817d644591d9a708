//! Generation domain module.
//!
//! The text-generation provider is consumed through the [`TextGenerator`]
//! trait so tool handlers never depend on a concrete HTTP client. The
//! production implementation talks to an OpenAI-compatible chat completions
//! endpoint.

mod error;
mod generator;
pub mod openai;

pub use error::GenerationError;
pub use generator::{SharedGenerator, TextGenerator};
pub use openai::OpenAiGenerator;
