//! Domains module containing business logic organized by bounded contexts.
//!
//! - **generation**: the text-generation provider behind a trait
//! - **tools**: MCP tools that can be executed by clients

pub mod generation;
pub mod tools;
