//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one directory per tool)
//! - `router.rs` - ToolRouter builder used by the server handler
//! - `registry.rs` - Central list of tool names and metadata
//! - `error.rs` - Tool-specific error types
//!
//! The set of tools is fixed when the server is constructed.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
