//! Profiling error types.

use thiserror::Error;

/// Result type for profiling report operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors that can occur while exporting profiling data.
///
/// Instrumenting a computation never produces one of these; only the
/// reporting side (serialization, file output) can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Export(e.to_string())
    }
}
