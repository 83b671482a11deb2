//! Toolkit configuration

use crate::error::UnifiedError;
use crate::schema::SchemaOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Description used for tools whose server did not provide one
pub const DEFAULT_TOOL_DESCRIPTION: &str = "MCP tool";

/// Helper function for default tool description
fn default_tool_description() -> String {
    DEFAULT_TOOL_DESCRIPTION.to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl UnifiedError for ConfigError {
    fn error_code(&self) -> &str {
        match self {
            Self::Io { .. } => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Io { path, .. } => path,
            Self::Parse(err) => err.message(),
            Self::Invalid(msg) => msg,
        }
    }
}

/// Configuration for an MCP server toolkit
///
/// ```toml
/// max_concurrent_connections = 4
/// default_tool_description = "Remote tool"
///
/// [schema]
/// deny_unknown_keywords = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Upper bound on servers connected and listed at the same time.
    /// `None` processes every connection at once.
    #[serde(default)]
    pub max_concurrent_connections: Option<usize>,
    /// Description used for tools whose server did not provide one
    #[serde(default = "default_tool_description")]
    pub default_tool_description: String,
    /// Schema compiler options
    #[serde(default)]
    pub schema: SchemaOptions,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            max_concurrent_connections: None,
            default_tool_description: default_tool_description(),
            schema: SchemaOptions::default(),
        }
    }
}

impl ToolkitConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject settings the toolkit cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_connections == Some(0) {
            return Err(ConfigError::Invalid(
                "max_concurrent_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge with another config (other takes precedence where set)
    pub fn merge(&mut self, other: ToolkitConfig) {
        if other.max_concurrent_connections.is_some() {
            self.max_concurrent_connections = other.max_concurrent_connections;
        }
        if other.default_tool_description != default_tool_description() {
            self.default_tool_description = other.default_tool_description;
        }
        if other.schema.deny_unknown_keywords {
            self.schema.deny_unknown_keywords = true;
        }
    }
}
