//! MCP HTML Maker
//!
//! A Model Context Protocol (MCP) server exposing a single tool,
//! `make-html-page`, which asks a text-generation provider for a complete
//! HTML page matching a description and saves it to a file.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, output path security, the
//!   server handler and transports
//! - **domains**: business logic
//!   - **generation**: the provider behind the `TextGenerator` trait
//!   - **tools**: the tool definition, registry and router
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_html_maker::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
