//! Tool registry for managing available tools

use crate::tools::base::{Tool, ToolError};
use crate::tools::types::{ToolCall, ToolResult, ToolSchema};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ordered collection of tools handed to an agent runtime
///
/// Tools from different MCP servers may share a name, so registration keeps
/// every tool in insertion order; lookups by name return the first match.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        debug!(tool = tool.name(), "registering tool");
        self.tools.push(tool);
    }

    /// Register multiple tools, preserving their order
    pub fn register_all(&mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) {
        for tool in tools {
            self.register(tool);
        }
    }

    /// Get the first tool registered under `name`
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Get every tool registered under `name`
    pub fn get_all(&self, name: &str) -> Vec<&Arc<dyn Tool>> {
        self.tools.iter().filter(|tool| tool.name() == name).collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all tool names, in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name().to_string()).collect()
    }

    /// Schemas for every registered tool
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|tool| tool.schema()).collect()
    }

    /// Get all tools
    pub fn all_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.clone()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call to the tool named in it
    #[instrument(skip(self, call), fields(tool_name = %call.name, call_id = %call.id))]
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        tool.execute_with_timing(call).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct ConstTool {
        name: &'static str,
        output: Value,
    }

    #[async_trait]
    impl Tool for ConstTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Returns a fixed value"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(self.name, self.description(), json!({"type": "object"}))
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::new(&call.id, self.name, self.output.clone()))
        }
    }

    fn const_tool(name: &'static str, output: Value) -> Arc<dyn Tool> {
        Arc::new(ConstTool { name, output })
    }

    #[test]
    fn test_duplicate_names_are_kept_in_order() {
        let mut registry = ToolRegistry::new();
        registry.register(const_tool("ping", json!("first")));
        registry.register(const_tool("ping", json!("second")));
        registry.register(const_tool("add", json!(5)));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.tool_names(), vec!["ping", "ping", "add"]);
        assert_eq!(registry.get_all("ping").len(), 2);
        assert!(registry.has_tool("add"));
        assert!(!registry.has_tool("missing"));
    }

    #[tokio::test]
    async fn test_execute_dispatches_to_first_match() {
        let mut registry = ToolRegistry::new();
        registry.register_all(vec![
            const_tool("ping", json!("first")),
            const_tool("ping", json!("second")),
        ]);

        let result = registry
            .execute(&ToolCall::new("call-1", "ping", json!({})))
            .await
            .unwrap();
        assert_eq!(result.content, json!("first"));
        assert_eq!(result.call_id, "call-1");
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute(&ToolCall::new("call-1", "nope", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "nope"));
    }

    #[test]
    fn test_schemas() {
        let mut registry = ToolRegistry::new();
        registry.register(const_tool("add", json!(5)));

        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "add");
        assert!(registry.schemas()[0].parameters.is_object());
    }
}
