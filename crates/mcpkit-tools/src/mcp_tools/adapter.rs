//! MCP Tool Adapter
//!
//! Wraps MCP tools as mcpkit tools, so remote tools can be handed to an agent
//! runtime next to local ones.

use async_trait::async_trait;
use mcpkit_core::config::DEFAULT_TOOL_DESCRIPTION;
use mcpkit_core::mcp::{McpClient, McpTool};
use mcpkit_core::schema::{InputValidator, SchemaCompiler, SchemaError, sanitize_json_schema};
use mcpkit_core::tools::{Tool, ToolCall, ToolError, ToolResult, ToolSchema};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Adapter that wraps an MCP tool as an mcpkit [`Tool`]
///
/// The input schema is compiled once, when the adapter is built. Calls that
/// fail validation are rejected before the client is involved.
pub struct McpToolAdapter<C: McpClient> {
    /// The MCP tool definition
    mcp_tool: McpTool,
    /// Description exposed to the agent
    description: String,
    /// Compiled input schema
    validator: InputValidator,
    /// Client for executing the tool
    client: Arc<C>,
    /// Server name for identification
    server_name: Option<String>,
}

impl<C: McpClient> McpToolAdapter<C> {
    /// Bridge one tool descriptor from an already connected client.
    ///
    /// Fails if the descriptor's input schema cannot be compiled.
    pub fn bridge(
        mcp_tool: McpTool,
        client: Arc<C>,
        compiler: &SchemaCompiler,
    ) -> Result<Self, SchemaError> {
        let validator = compiler.compile(&mcp_tool.input_schema)?;
        let description = mcp_tool
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_TOOL_DESCRIPTION.to_string());

        debug!(tool = %mcp_tool.name, "bridged MCP tool");

        Ok(Self {
            mcp_tool,
            description,
            validator,
            client,
            server_name: None,
        })
    }

    /// Record the server this tool came from
    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    /// Description for tools whose descriptor had none
    pub fn with_fallback_description(mut self, description: impl Into<String>) -> Self {
        if self.mcp_tool.description.is_none() {
            self.description = description.into();
        }
        self
    }

    /// Get the server name this tool belongs to
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    /// Get the original MCP tool definition
    pub fn mcp_tool(&self) -> &McpTool {
        &self.mcp_tool
    }

    /// Compiled input validator
    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }

    /// Client this tool forwards calls to
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }
}

impl<C: McpClient> std::fmt::Debug for McpToolAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpToolAdapter")
            .field("name", &self.mcp_tool.name)
            .field("server", &self.server_name)
            .finish()
    }
}

impl<C: McpClient> Clone for McpToolAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            mcp_tool: self.mcp_tool.clone(),
            description: self.description.clone(),
            validator: self.validator.clone(),
            client: Arc::clone(&self.client),
            server_name: self.server_name.clone(),
        }
    }
}

#[async_trait]
impl<C: McpClient + 'static> Tool for McpToolAdapter<C> {
    fn name(&self) -> &str {
        &self.mcp_tool.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            sanitize_json_schema(self.validator.source()),
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        self.validator.validate(&call.arguments)?;
        Ok(())
    }

    #[instrument(skip(self, call), fields(tool_name = %call.name, call_id = %call.id))]
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        // the remote side must never see input that fails the schema
        self.validate(call)?;

        let content = self
            .client
            .call_tool(&self.mcp_tool.name, call.arguments.clone())
            .await?;

        Ok(ToolResult::new(&call.id, self.name(), content))
    }
}
