//! MCP Server Toolkit
//!
//! Connects any number of MCP servers at once and collects their tools.

use super::adapter::McpToolAdapter;
use super::error::ToolkitError;
use futures::future::try_join_all;
use futures::{StreamExt, TryStreamExt, stream};
use mcpkit_core::config::ToolkitConfig;
use mcpkit_core::mcp::{McpClient, McpServerConnection};
use mcpkit_core::schema::SchemaCompiler;
use mcpkit_core::tools::{Tool, ToolRegistry};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A server whose tools were registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    /// Server label
    pub name: String,
    /// Number of tools the server contributed
    pub tool_count: usize,
}

#[derive(Default)]
struct ToolkitState {
    tools: Vec<Arc<dyn Tool>>,
    /// One entry per append to `tools`, in the same order
    servers: Vec<ServerSummary>,
}

/// Collection of tools bridged from MCP servers
///
/// Tools are appended per server, each server's tools contiguous and in the
/// order the server listed them. Servers are appended in the order they
/// finish setting up.
pub struct McpServerToolkit {
    state: RwLock<ToolkitState>,
    compiler: SchemaCompiler,
    config: ToolkitConfig,
}

impl McpServerToolkit {
    /// Create an empty toolkit with default configuration
    pub fn new() -> Self {
        Self::with_config(&ToolkitConfig::default())
    }

    /// Create an empty toolkit
    pub fn with_config(config: &ToolkitConfig) -> Self {
        Self {
            state: RwLock::new(ToolkitState::default()),
            compiler: SchemaCompiler::new(config.schema.clone()),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Connect every server, list its tools and register them.
    ///
    /// Servers are set up concurrently. The first failure is returned and the
    /// servers still in flight are abandoned. Servers that finished before the
    /// failure keep their tools; a failing server never contributes any.
    pub async fn add_tools<C, I>(&self, connections: I) -> Result<(), ToolkitError>
    where
        C: McpClient + 'static,
        I: IntoIterator<Item = McpServerConnection<C>>,
    {
        let setups = connections
            .into_iter()
            .enumerate()
            .map(move |(index, connection)| {
                let McpServerConnection {
                    client,
                    transport,
                    name,
                } = connection;
                let server = name.unwrap_or_else(|| format!("server-{}", index));
                self.add_server_tools(server, client, transport)
            });

        match self.config.max_concurrent_connections {
            Some(limit) => {
                stream::iter(setups)
                    .buffer_unordered(limit.max(1))
                    .try_collect::<Vec<()>>()
                    .await?;
            }
            None => {
                try_join_all(setups).await?;
            }
        }

        Ok(())
    }

    #[instrument(skip_all, fields(server = %server))]
    async fn add_server_tools<C: McpClient + 'static>(
        &self,
        server: String,
        client: Arc<C>,
        transport: C::Transport,
    ) -> Result<(), ToolkitError> {
        client
            .connect(transport)
            .await
            .map_err(|source| ToolkitError::Connect {
                server: server.clone(),
                source,
            })?;
        debug!("connected to MCP server");

        let descriptors = client
            .list_tools()
            .await
            .map_err(|source| ToolkitError::ListTools {
                server: server.clone(),
                source,
            })?;
        debug!(count = descriptors.len(), "listed MCP tools");

        let tools = descriptors
            .into_iter()
            .map(|descriptor| {
                let tool_name = descriptor.name.clone();
                McpToolAdapter::bridge(descriptor, Arc::clone(&client), &self.compiler)
                    .map(|adapter| {
                        let adapter = adapter
                            .with_server_name(&server)
                            .with_fallback_description(&self.config.default_tool_description);
                        Arc::new(adapter) as Arc<dyn Tool>
                    })
                    .map_err(|source| ToolkitError::Schema {
                        server: server.clone(),
                        tool: tool_name,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tool_count = tools.len();
        {
            let mut state = self.state.write();
            state.tools.extend(tools);
            state.servers.push(ServerSummary {
                name: server,
                tool_count,
            });
        }

        info!(tool_count, "registered MCP server tools");
        Ok(())
    }

    /// Snapshot of every registered tool, in registration order
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.state.read().tools.clone()
    }

    pub fn tool_count(&self) -> usize {
        self.state.read().tools.len()
    }

    /// First registered tool named `name`
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.state
            .read()
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .cloned()
    }

    /// Tools contributed by the server labelled `server`
    pub fn tools_from_server(&self, server: &str) -> Vec<Arc<dyn Tool>> {
        let state = self.state.read();
        let mut offset = 0;
        let mut tools = Vec::new();
        for summary in &state.servers {
            let end = offset + summary.tool_count;
            if summary.name == server {
                tools.extend(state.tools[offset..end].iter().cloned());
            }
            offset = end;
        }
        tools
    }

    /// Servers whose tools were registered, in registration order
    pub fn servers(&self) -> Vec<ServerSummary> {
        self.state.read().servers.clone()
    }

    /// Hand every tool to a local registry
    pub fn register_into(&self, registry: &mut ToolRegistry) {
        registry.register_all(self.tools());
    }
}

impl Default for McpServerToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for McpServerToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("McpServerToolkit")
            .field("servers", &state.servers)
            .field("tool_count", &state.tools.len())
            .finish()
    }
}
