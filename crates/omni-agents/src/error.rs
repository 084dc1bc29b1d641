//! Default-agent service error types.

/// Errors raised by a default-agent service.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse API response.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl AgentError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}

/// Result type for default-agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
