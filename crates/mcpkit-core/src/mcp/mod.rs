//! Model Context Protocol (MCP) integration
//!
//! This module defines what mcpkit needs from an MCP client session and the
//! descriptor types exchanged with it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mcpkit_core::mcp::{McpClient, McpServerConnection};
//!
//! let client = Arc::new(MyStdioClient::default());
//! let transport = MyStdioTransport::spawn("mcp-server", &["--stdio"]).await?;
//! let connection = McpServerConnection::new(client, transport).with_name("files");
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod types;

pub use client::McpClient;
pub use connection::McpServerConnection;
pub use error::McpError;
pub use types::McpTool;
