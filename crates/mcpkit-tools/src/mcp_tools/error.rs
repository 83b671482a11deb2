//! Toolkit setup errors

use mcpkit_core::error::UnifiedError;
use mcpkit_core::mcp::McpError;
use mcpkit_core::schema::SchemaError;
use thiserror::Error;

/// Failure while registering tools from a server
///
/// Each variant names the server it came from and keeps the underlying error
/// as it was produced.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// `connect` failed
    #[error("Failed to connect to MCP server {server}: {source}")]
    Connect {
        server: String,
        #[source]
        source: McpError,
    },

    /// `list_tools` failed
    #[error("Failed to list tools from MCP server {server}: {source}")]
    ListTools {
        server: String,
        #[source]
        source: McpError,
    },

    /// A tool's input schema could not be compiled
    #[error("Invalid input schema for tool {tool} on MCP server {server}: {source}")]
    Schema {
        server: String,
        tool: String,
        #[source]
        source: SchemaError,
    },
}

impl ToolkitError {
    /// Server the failure came from
    pub fn server(&self) -> &str {
        match self {
            Self::Connect { server, .. }
            | Self::ListTools { server, .. }
            | Self::Schema { server, .. } => server,
        }
    }

    /// The client's error, exactly as the client returned it
    pub fn mcp_error(&self) -> Option<&McpError> {
        match self {
            Self::Connect { source, .. } | Self::ListTools { source, .. } => Some(source),
            Self::Schema { .. } => None,
        }
    }

    /// The schema compilation error, if that is what failed
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Take the client's error out of this one
    pub fn into_mcp_error(self) -> Option<McpError> {
        match self {
            Self::Connect { source, .. } | Self::ListTools { source, .. } => Some(source),
            Self::Schema { .. } => None,
        }
    }
}

impl UnifiedError for ToolkitError {
    fn error_code(&self) -> &str {
        match self {
            Self::Connect { .. } => "TOOLKIT_CONNECT",
            Self::ListTools { .. } => "TOOLKIT_LIST_TOOLS",
            Self::Schema { .. } => "TOOLKIT_SCHEMA",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Connect { source, .. } | Self::ListTools { source, .. } => source.message(),
            Self::Schema { source, .. } => source.message(),
        }
    }

    fn context(&self) -> Option<&str> {
        Some(self.server())
    }

    fn is_retryable(&self) -> bool {
        self.mcp_error().is_some_and(|err| err.is_retryable())
    }
}
