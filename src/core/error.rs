//! Custom error types for Ana
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Ana operations
#[derive(Error, Debug)]
pub enum AnaError {
    /// Collaborator (text-completion service) errors
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Tool execution errors
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing API credentials
    #[error("GROQ_API_KEY is not set. Export it or add it to ~/.config/ana/config.toml")]
    MissingApiKey,

    /// Task exceeded the wall-clock ceiling
    #[error("Task did not finish within {0} seconds")]
    TaskTimeout(u64),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Ana operations
pub type Result<T> = std::result::Result<T, AnaError>;

impl AnaError {
    /// Create a collaborator error
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::ToolExecution(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
