use async_trait::async_trait;
use mcpkit_core::mcp::{McpClient, McpError, McpTool};
use mockall::mock;
use serde_json::{Value, json};

mock! {
    pub Client {}

    #[async_trait]
    impl McpClient for Client {
        type Transport = ();

        async fn connect(&self, transport: ()) -> Result<(), McpError>;
        async fn list_tools(&self) -> Result<Vec<McpTool>, McpError>;
        async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, McpError>;
    }
}

pub fn add_tool() -> McpTool {
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

/// A client that connects and lists `tools` exactly once
pub fn listing_client(tools: Vec<McpTool>) -> MockClient {
    let mut client = MockClient::new();
    client.expect_connect().times(1).returning(|_| Ok(()));
    client
        .expect_list_tools()
        .times(1)
        .returning(move || Ok(tools.clone()));
    client
}
