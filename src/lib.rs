//! mcpkit
//!
//! Bridges the tools of Model Context Protocol servers into locally callable,
//! schema-validated agent tools.
//!
//! ```rust,ignore
//! use mcpkit::{McpServerConnection, McpServerToolkit};
//!
//! let toolkit = McpServerToolkit::new();
//! toolkit
//!     .add_tools(vec![McpServerConnection::new(client, transport)])
//!     .await?;
//! let tools = toolkit.tools();
//! ```

pub use mcpkit_core::{
    ConfigError, InputValidator, McpClient, McpError, McpServerConnection, McpTool,
    SchemaCompiler, SchemaError, SchemaOptions, Tool, ToolCall, ToolError, ToolRegistry,
    ToolResult, ToolSchema, ToolkitConfig, UnifiedError, ValidationError,
};
pub use mcpkit_tools::{McpServerToolkit, McpToolAdapter, ServerSummary, ToolkitError};
