//! Error types for the GLM client.

use thiserror::Error;

/// Result type for GLM client operations.
pub type Result<T> = std::result::Result<T, GlmError>;

/// GLM client errors.
///
/// These are upstream failures, not content failures: callers must surface
/// them (with a user-facing message per variant) rather than substitute a
/// fallback verdict, which is reserved for unparsable *content*.
#[derive(Debug, Error)]
pub enum GlmError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Provider rejected the request for request-rate reasons (HTTP 429)
    #[error("Rate limited by provider")]
    RateLimited,

    /// Account balance exhausted (provider error code 1113)
    #[error("Insufficient account balance")]
    InsufficientBalance,

    /// Other API error (non-2xx response, invalid request)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, response without choices)
    #[error("Parse error: {0}")]
    Parse(String),
}
