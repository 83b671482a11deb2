//! Error conventions shared by all mcpkit crates
//!
//! Every error type in the workspace implements [`UnifiedError`], which gives
//! callers a stable machine-readable code next to the human-readable message:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - context: Optional additional context about where the error occurred

/// Common surface for mcpkit errors
pub trait UnifiedError: std::error::Error {
    /// Stable identifier, e.g. `MCP_CONNECTION`
    fn error_code(&self) -> &str;

    /// Message without the variant prefix added by `Display`
    fn message(&self) -> &str;

    /// Additional context, if any was attached
    fn context(&self) -> Option<&str> {
        None
    }

    /// Whether repeating the same operation could plausibly succeed.
    ///
    /// mcpkit never retries on its own; this is informational for callers.
    fn is_retryable(&self) -> bool {
        false
    }
}
