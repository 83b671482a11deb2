//! Local tool framework
//!
//! - [`Tool`] - The trait every callable tool implements
//! - [`ToolError`] - Error types for tool operations
//! - [`ToolRegistry`] - The registration sink agent runtimes read tools from

pub mod base;
pub mod registry;
pub mod types;

pub use base::{Tool, ToolError};
pub use registry::ToolRegistry;
pub use types::{ToolCall, ToolResult, ToolSchema};
