//! MCP error types

use crate::error::UnifiedError;
use thiserror::Error;

/// Errors reported by an MCP client
///
/// mcpkit never constructs these on the remote path: whatever the client
/// returns is handed to the caller unchanged. The constructors exist for
/// client implementations and tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum McpError {
    /// The server could not be reached or dropped the session
    #[error("MCP connection failed: {message}")]
    Connection {
        message: String,
        context: Option<String>,
    },

    /// The server answered with something the client could not interpret
    #[error("MCP protocol violation: {message}")]
    Protocol {
        message: String,
        context: Option<String>,
    },

    /// The underlying byte stream failed
    #[error("MCP transport failed: {message}")]
    Transport {
        message: String,
        context: Option<String>,
    },

    /// JSON-RPC error object returned by the server
    #[error("MCP server error {code}: {message}")]
    Server {
        code: i32,
        message: String,
        context: Option<String>,
    },

    /// The server does not know the requested tool
    #[error("MCP tool not found: {name}")]
    ToolNotFound {
        name: String,
        context: Option<String>,
    },

    #[error("MCP request timed out after {seconds}s")]
    Timeout {
        seconds: u64,
        context: Option<String>,
    },

    #[error("MCP payload could not be (de)serialized: {message}")]
    Serialization {
        message: String,
        context: Option<String>,
    },

    /// A request was made before `connect` completed
    #[error("MCP client used before connect")]
    NotInitialized,

    #[error("MCP error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl McpError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context: None,
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            context: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            context: None,
        }
    }

    /// Error object with a JSON-RPC error code
    pub fn server(code: i32, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound {
            name: name.into(),
            context: None,
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout {
            seconds,
            context: None,
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            context: None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }

    /// Attach context, e.g. the request that failed.
    ///
    /// `NotInitialized` carries no context and is returned as is.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Some(slot) = self.context_slot() {
            *slot = Some(context.into());
        }
        self
    }

    fn context_slot(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Connection { context, .. }
            | Self::Protocol { context, .. }
            | Self::Transport { context, .. }
            | Self::Server { context, .. }
            | Self::ToolNotFound { context, .. }
            | Self::Timeout { context, .. }
            | Self::Serialization { context, .. }
            | Self::Other { context, .. } => Some(context),
            Self::NotInitialized => None,
        }
    }
}

impl UnifiedError for McpError {
    fn error_code(&self) -> &str {
        match self {
            Self::Connection { .. } => "MCP_CONNECTION",
            Self::Protocol { .. } => "MCP_PROTOCOL",
            Self::Transport { .. } => "MCP_TRANSPORT",
            Self::Server { .. } => "MCP_SERVER",
            Self::ToolNotFound { .. } => "MCP_TOOL_NOT_FOUND",
            Self::Timeout { .. } => "MCP_TIMEOUT",
            Self::Serialization { .. } => "MCP_SERIALIZATION",
            Self::NotInitialized => "MCP_NOT_INITIALIZED",
            Self::Other { .. } => "MCP_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Connection { message, .. }
            | Self::Protocol { message, .. }
            | Self::Transport { message, .. }
            | Self::Server { message, .. }
            | Self::Serialization { message, .. }
            | Self::Other { message, .. } => message,
            Self::ToolNotFound { name, .. } => name,
            Self::Timeout { .. } => "request timed out",
            Self::NotInitialized => "client used before connect",
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Connection { context, .. }
            | Self::Protocol { context, .. }
            | Self::Transport { context, .. }
            | Self::Server { context, .. }
            | Self::ToolNotFound { context, .. }
            | Self::Timeout { context, .. }
            | Self::Serialization { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
            Self::NotInitialized => None,
        }
    }

    /// Failures of the link or of the server itself may succeed on a retry;
    /// malformed exchanges will not.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Transport { .. } | Self::Timeout { .. } | Self::Server { .. }
        )
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        Self::transport(err.to_string())
    }
}
