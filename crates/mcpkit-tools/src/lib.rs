//! MCP server toolkit for mcpkit
//!
//! Connects MCP servers and exposes their tools as schema-checked local tools.

pub mod mcp_tools;

pub use mcp_tools::{McpServerToolkit, McpToolAdapter, ServerSummary, ToolkitError};
