//! Core Tool trait definition

use crate::error::UnifiedError;
use crate::mcp::McpError;
use crate::schema::ValidationError;
use crate::tools::types::{ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::time::Instant;

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Input rejected by the tool's schema; nothing was executed
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Error reported by the MCP client, passed through unchanged
    #[error(transparent)]
    Mcp(#[from] McpError),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    /// The underlying MCP error, when the failure came from the remote side
    pub fn as_mcp(&self) -> Option<&McpError> {
        match self {
            Self::Mcp(err) => Some(err),
            _ => None,
        }
    }
}

impl UnifiedError for ToolError {
    fn error_code(&self) -> &str {
        match self {
            Self::InvalidInput(_) => "TOOL_INVALID_INPUT",
            Self::Mcp(err) => err.error_code(),
            Self::NotFound(_) => "TOOL_NOT_FOUND",
            Self::ExecutionFailed(_) => "TOOL_EXEC_FAILED",
            Self::Json(_) => "TOOL_JSON_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidInput(err) => err.message(),
            Self::Mcp(err) => err.message(),
            Self::NotFound(name) => name,
            Self::ExecutionFailed(msg) => msg,
            Self::Json(_) => "JSON error occurred",
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Mcp(err) if err.is_retryable())
    }
}

/// A locally callable tool
///
/// Implementations must not perform side effects for input that fails
/// [`validate`](Tool::validate).
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the agent uses to call the tool
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Schema advertised to the agent runtime
    fn schema(&self) -> ToolSchema;

    /// Check the call's input without executing anything
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Execute the tool
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate, execute, and record how long execution took
    async fn execute_with_timing(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let start_time = Instant::now();

        self.validate(call)?;
        let result = self.execute(call).await?;

        Ok(result.with_execution_time(start_time.elapsed().as_millis() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaCompiler;
    use serde_json::json;

    struct EchoTool {
        validator: crate::schema::InputValidator,
    }

    impl EchoTool {
        fn new() -> Self {
            let validator = SchemaCompiler::default()
                .compile(&json!({
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                }))
                .unwrap();
            Self { validator }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input text"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(self.name(), self.description(), self.validator.source().clone())
        }

        fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
            self.validator.validate(&call.arguments)?;
            Ok(())
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::new(&call.id, self.name(), call.arguments["text"].clone()))
        }
    }

    #[tokio::test]
    async fn test_execute_with_timing_records_duration() {
        let tool = EchoTool::new();
        let call = ToolCall::new("call-1", "echo", json!({"text": "hi"}));

        let result = tool.execute_with_timing(&call).await.unwrap();
        assert_eq!(result.content, json!("hi"));
        assert!(result.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_execute_with_timing_validates_first() {
        let tool = EchoTool::new();
        let call = ToolCall::new("call-1", "echo", json!({"text": 1}));

        let err = tool.execute_with_timing(&call).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert_eq!(err.error_code(), "TOOL_INVALID_INPUT");
    }

    #[test]
    fn test_mcp_errors_keep_their_code() {
        let err = ToolError::from(McpError::timeout(5));
        assert_eq!(err.error_code(), "MCP_TIMEOUT");
        assert!(err.is_retryable());
        assert_eq!(err.as_mcp(), Some(&McpError::timeout(5)));
    }
}
