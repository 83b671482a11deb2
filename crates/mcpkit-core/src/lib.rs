//! mcpkit core library
//!
//! This crate provides the building blocks the MCP toolkit is assembled from:
//! the client contract for remote MCP servers, the JSON Schema compiler that
//! turns tool input schemas into validators, the local tool framework, and
//! configuration.

pub mod config;
pub mod error;
pub mod mcp;
pub mod schema;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, DEFAULT_TOOL_DESCRIPTION, ToolkitConfig};
pub use error::UnifiedError;
pub use mcp::{McpClient, McpError, McpServerConnection, McpTool};
pub use schema::{InputValidator, SchemaCompiler, SchemaError, SchemaOptions, ValidationError};
pub use tools::{Tool, ToolCall, ToolError, ToolRegistry, ToolResult, ToolSchema};
