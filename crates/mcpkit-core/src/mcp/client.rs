//! MCP client contract
//!
//! mcpkit does not speak the MCP wire protocol itself. Anything that can open
//! a session over some transport, list tools and call them can be bridged.

use super::error::McpError;
use super::types::McpTool;
use async_trait::async_trait;
use serde_json::Value;

/// Capabilities the toolkit needs from an MCP client session
///
/// A client is shared between every tool bridged from its server, so all
/// operations take `&self`; implementations keep their session state behind
/// interior mutability.
#[async_trait]
pub trait McpClient: Send + Sync {
    /// Channel the client speaks over. The toolkit hands it to
    /// [`connect`](McpClient::connect) without looking at it.
    type Transport: Send;

    /// Open the session over `transport`.
    async fn connect(&self, transport: Self::Transport) -> Result<(), McpError>;

    /// List the server's tools, in server order.
    async fn list_tools(&self) -> Result<Vec<McpTool>, McpError>;

    /// Invoke a remote tool. The returned value is opaque to mcpkit.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, McpError>;
}
