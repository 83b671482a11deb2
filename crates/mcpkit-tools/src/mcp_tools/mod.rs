//! MCP (Model Context Protocol) tools integration
//!
//! Bridges the tools of remote MCP servers into local [`Tool`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcpkit_tools::mcp_tools::McpServerToolkit;
//! use mcpkit_core::mcp::McpServerConnection;
//!
//! let toolkit = McpServerToolkit::new();
//! toolkit
//!     .add_tools(vec![
//!         McpServerConnection::new(calc_client, calc_transport).with_name("calc"),
//!         McpServerConnection::new(net_client, net_transport).with_name("net"),
//!     ])
//!     .await?;
//!
//! for tool in toolkit.tools() {
//!     println!("{}: {}", tool.name(), tool.description());
//! }
//! ```
//!
//! [`Tool`]: mcpkit_core::tools::Tool

pub mod adapter;
pub mod error;
pub mod toolkit;

#[cfg(test)]
mod mock;

pub use adapter::McpToolAdapter;
pub use mcpkit_core::config::DEFAULT_TOOL_DESCRIPTION;
pub use error::ToolkitError;
pub use toolkit::{McpServerToolkit, ServerSummary};
