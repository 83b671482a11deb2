//! Schema compilation and input validation errors

use crate::error::UnifiedError;
use std::fmt;
use thiserror::Error;

/// A tool input schema could not be compiled into a validator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A keyword is present but its value is not usable
    #[error("Malformed schema at {path}: {message}")]
    Malformed { path: String, message: String },

    /// A JSON Schema keyword the compiler deliberately does not implement
    #[error("Unsupported schema keyword '{keyword}' at {path}")]
    Unsupported { path: String, keyword: String },

    /// A keyword outside JSON Schema, rejected because unknown keywords are denied
    #[error("Unknown schema keyword '{keyword}' at {path}")]
    UnknownKeyword { path: String, keyword: String },
}

impl SchemaError {
    pub(crate) fn malformed(path: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Location of the offending keyword, as a `#/...` pointer
    pub fn path(&self) -> &str {
        match self {
            Self::Malformed { path, .. }
            | Self::Unsupported { path, .. }
            | Self::UnknownKeyword { path, .. } => path,
        }
    }
}

impl UnifiedError for SchemaError {
    fn error_code(&self) -> &str {
        match self {
            Self::Malformed { .. } => "SCHEMA_MALFORMED",
            Self::Unsupported { .. } => "SCHEMA_UNSUPPORTED",
            Self::UnknownKeyword { .. } => "SCHEMA_UNKNOWN_KEYWORD",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Malformed { message, .. } => message,
            Self::Unsupported { keyword, .. } | Self::UnknownKeyword { keyword, .. } => keyword,
        }
    }

    fn context(&self) -> Option<&str> {
        Some(self.path())
    }
}

/// One way in which an input value violates its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Location in the input, `$` being the root
    pub path: String,
    /// What is wrong at that location
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Input rejected by an [`InputValidator`](super::InputValidator)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    /// Every violation found, in traversal order. Never empty.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Whether any issue was reported at exactly `path`
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl UnifiedError for ValidationError {
    fn error_code(&self) -> &str {
        "SCHEMA_VALIDATION"
    }

    fn message(&self) -> &str {
        self.issues
            .first()
            .map(|issue| issue.message.as_str())
            .unwrap_or("invalid input")
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    let rendered = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("input failed validation: {}", rendered)
}
