//! Remote server connections handed to the toolkit

use super::client::McpClient;
use std::fmt;
use std::sync::Arc;

/// A client paired with the transport it should connect over
///
/// The caller keeps ownership of the client through its own `Arc`; the toolkit
/// never closes it.
pub struct McpServerConnection<C: McpClient> {
    /// Session used to list and call tools
    pub client: Arc<C>,
    /// Transport passed to [`McpClient::connect`]
    pub transport: C::Transport,
    /// Optional server label used in logs and per-server lookups
    pub name: Option<String>,
}

impl<C: McpClient> McpServerConnection<C> {
    /// Pair a client with its transport
    pub fn new(client: Arc<C>, transport: C::Transport) -> Self {
        Self {
            client,
            transport,
            name: None,
        }
    }

    /// Label the server
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<C: McpClient> fmt::Debug for McpServerConnection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpServerConnection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
