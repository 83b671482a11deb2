//! End-to-end toolkit scenarios
//!
//! Drives the toolkit with in-memory MCP servers that record every call they
//! receive.

use async_trait::async_trait;
use mcpkit::{
    McpClient, McpError, McpServerConnection, McpServerToolkit, McpTool, Tool, ToolCall,
    ToolError, ToolRegistry, ToolkitConfig, ToolkitError,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mcpkit=debug")
        .with_test_writer()
        .try_init();
}

/// In-memory server answering `call_tool` with a fixed function
struct RecordingClient {
    label: &'static str,
    catalog: Vec<McpTool>,
    list_error: Option<McpError>,
    connected_over: Mutex<Option<String>>,
    calls: Mutex<Vec<(String, Value)>>,
    answer: fn(&str, &Value) -> Value,
}

impl RecordingClient {
    fn new(label: &'static str, catalog: Vec<McpTool>, answer: fn(&str, &Value) -> Value) -> Self {
        Self {
            label,
            catalog,
            list_error: None,
            connected_over: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            answer,
        }
    }

    fn failing_list(label: &'static str, error: McpError) -> Self {
        Self {
            list_error: Some(error),
            ..Self::new(label, Vec::new(), |_, _| Value::Null)
        }
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl McpClient for RecordingClient {
    type Transport = String;

    async fn connect(&self, transport: String) -> Result<(), McpError> {
        *self.connected_over.lock() = Some(transport);
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<McpTool>, McpError> {
        if self.connected_over.lock().is_none() {
            return Err(McpError::NotInitialized);
        }
        match &self.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.catalog.clone()),
        }
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, McpError> {
        let result = (self.answer)(name, &arguments);
        self.calls.lock().push((name.to_string(), arguments));
        Ok(result)
    }
}

fn add_tool() -> McpTool {
    McpTool::new("add")
        .with_description("Add two numbers")
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "b": { "type": "number" }
            },
            "required": ["a", "b"]
        }))
}

fn sum(_: &str, arguments: &Value) -> Value {
    let a = arguments["a"].as_f64().unwrap_or_default();
    let b = arguments["b"].as_f64().unwrap_or_default();
    json!(a + b)
}

fn connect(client: &Arc<RecordingClient>) -> McpServerConnection<RecordingClient> {
    McpServerConnection::new(Arc::clone(client), format!("stdio://{}", client.label))
        .with_name(client.label)
}

#[tokio::test]
async fn add_tool_returns_remote_result() -> anyhow::Result<()> {
    init_tracing();
    let calc = Arc::new(RecordingClient::new("calc", vec![add_tool()], sum));

    let toolkit = McpServerToolkit::new();
    toolkit.add_tools(vec![connect(&calc)]).await?;

    let tools = toolkit.tools();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name(), "add");
    assert_eq!(tools[0].description(), "Add two numbers");

    let result = tools[0]
        .execute(&ToolCall::new("call-1", "add", json!({"a": 2, "b": 3})))
        .await?;
    assert_eq!(result.content, json!(5.0));
    assert_eq!(calc.calls(), vec![("add".to_string(), json!({"a": 2, "b": 3}))]);
    assert_eq!(calc.connected_over.lock().as_deref(), Some("stdio://calc"));
    Ok(())
}

#[tokio::test]
async fn same_name_tools_stay_bound_to_their_server() -> anyhow::Result<()> {
    init_tracing();
    let alpha = Arc::new(RecordingClient::new(
        "alpha",
        vec![McpTool::new("ping")],
        |_, _| json!("pong from alpha"),
    ));
    let beta = Arc::new(RecordingClient::new(
        "beta",
        vec![McpTool::new("ping")],
        |_, _| json!("pong from beta"),
    ));

    let toolkit = McpServerToolkit::new();
    toolkit.add_tools(vec![connect(&alpha), connect(&beta)]).await?;
    assert_eq!(toolkit.tool_count(), 2);

    for (server, client, expected) in [
        ("alpha", &alpha, "pong from alpha"),
        ("beta", &beta, "pong from beta"),
    ] {
        let tools = toolkit.tools_from_server(server);
        assert_eq!(tools.len(), 1);
        let result = tools[0]
            .execute(&ToolCall::new("call-1", "ping", json!({})))
            .await?;
        assert_eq!(result.content, json!(expected));
        assert_eq!(client.calls().len(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn failing_list_rejects_with_same_error() {
    init_tracing();
    let original = McpError::server(-32601, "tools/list not supported");
    let broken = Arc::new(RecordingClient::failing_list("broken", original.clone()));

    let toolkit = McpServerToolkit::new();
    let err = toolkit.add_tools(vec![connect(&broken)]).await.unwrap_err();

    assert!(matches!(err, ToolkitError::ListTools { .. }));
    assert_eq!(err.mcp_error(), Some(&original));
    assert_eq!(toolkit.tool_count(), 0);
    assert!(toolkit.servers().is_empty());
}

#[tokio::test]
async fn failing_server_does_not_undo_finished_ones() {
    init_tracing();
    let calc = Arc::new(RecordingClient::new("calc", vec![add_tool()], sum));
    let broken = Arc::new(RecordingClient::failing_list(
        "broken",
        McpError::transport("pipe closed"),
    ));

    let toolkit = McpServerToolkit::new();
    let err = toolkit
        .add_tools(vec![connect(&calc), connect(&broken)])
        .await
        .unwrap_err();

    assert_eq!(err.server(), "broken");
    assert!(toolkit.tools_from_server("broken").is_empty());
    assert_eq!(toolkit.tool_count(), 1);
    assert_eq!(toolkit.tools_from_server("calc").len(), 1);
    assert_eq!(toolkit.tools()[0].name(), "add");
}

#[tokio::test]
async fn invalid_input_never_reaches_server() {
    init_tracing();
    let calc = Arc::new(RecordingClient::new("calc", vec![add_tool()], sum));

    let toolkit = McpServerToolkit::new();
    toolkit.add_tools(vec![connect(&calc)]).await.unwrap();
    let add = toolkit.get_tool("add").unwrap();

    for arguments in [json!({"a": 2}), json!({"a": "2", "b": 3}), json!([2, 3])] {
        let err = add
            .execute(&ToolCall::new("call-1", "add", arguments))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
    assert!(calc.calls().is_empty());
}

#[tokio::test]
async fn tool_count_is_sum_of_catalogs() -> anyhow::Result<()> {
    init_tracing();
    let servers: Vec<_> = [("one", 1), ("two", 2), ("three", 3)]
        .into_iter()
        .map(|(label, count)| {
            let catalog = (0..count)
                .map(|i| McpTool::new(format!("{label}_{i}")))
                .collect();
            Arc::new(RecordingClient::new(label, catalog, |_, _| Value::Null))
        })
        .collect();

    let config = ToolkitConfig::from_toml_str("max_concurrent_connections = 2")?;
    let toolkit = McpServerToolkit::with_config(&config);
    toolkit.add_tools(servers.iter().map(connect)).await?;

    assert_eq!(toolkit.tool_count(), 6);
    assert_eq!(toolkit.servers().iter().map(|s| s.tool_count).sum::<usize>(), 6);

    let mut registry = ToolRegistry::new();
    toolkit.register_into(&mut registry);
    assert_eq!(registry.len(), 6);
    assert!(registry.has_tool("three_2"));
    Ok(())
}

#[tokio::test]
async fn empty_connection_list_is_a_no_op() -> anyhow::Result<()> {
    let toolkit = McpServerToolkit::new();
    toolkit
        .add_tools(Vec::<McpServerConnection<RecordingClient>>::new())
        .await?;
    assert!(toolkit.tools().is_empty());
    Ok(())
}
