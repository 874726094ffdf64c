//! Typed errors for verdict extraction.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors raised while recovering the two verdict fields from raw model text.
///
/// These are local and recoverable: callers substitute a
/// [`crate::FallbackGenerator`] result instead of surfacing them. Upstream
/// transport/API failures are a distinct taxonomy owned by the model client
/// and must never be converted into an `ExtractError`.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required field key was not found in the text (quoted or bare)
    #[error("missing '{0}' field")]
    MissingField(&'static str),

    /// The score value was located but did not decode as an integer
    #[error("invalid score value: {value}")]
    InvalidScore { value: String },

    /// Field key found but no colon-delimited value follows it
    #[error("no value after '{0}' key")]
    MissingValue(&'static str),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
