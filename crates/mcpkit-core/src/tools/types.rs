//! Tool-related type definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to run one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Tool input, checked against the tool's schema before dispatch
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Get a typed argument value
    pub fn get_argument<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.arguments
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Result of a tool execution
///
/// `content` is whatever the tool produced, untouched. For bridged MCP tools
/// that is the value returned by the remote client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool call ID this result corresponds to
    pub call_id: String,
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Tool output
    pub content: Value,
    /// Execution time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ToolResult {
    pub fn new(call_id: impl Into<String>, tool_name: impl Into<String>, content: Value) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            content,
            execution_time_ms: None,
        }
    }

    /// Add execution time
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }
}

/// Tool description in the shape LLM function-calling APIs expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the tool input
    pub parameters: Value,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_argument() {
        let call = ToolCall::new("call-1", "add", json!({"a": 2, "label": "sum"}));

        assert_eq!(call.get_argument::<i64>("a"), Some(2));
        assert_eq!(call.get_argument::<String>("label"), Some("sum".to_string()));
        assert_eq!(call.get_argument::<String>("a"), None);
        assert_eq!(call.get_argument::<i64>("missing"), None);
    }

    #[test]
    fn test_result_serialization_skips_missing_timing() {
        let result = ToolResult::new("call-1", "add", json!(5));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["content"], 5);
        assert!(json.get("execution_time_ms").is_none());

        let timed = serde_json::to_value(result.with_execution_time(12)).unwrap();
        assert_eq!(timed["execution_time_ms"], 12);
    }
}
