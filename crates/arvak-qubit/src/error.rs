//! Error types for the qubit crate.

use std::fmt::Display;

use thiserror::Error;

/// Errors produced while configuring a qubit model.
///
/// All of these are configuration defects: they are deterministic in the
/// inputs and are reported at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum QubitError {
    /// A circuit parameter is outside its valid domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value, rendered for display.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// No qubit family is registered under the requested tag.
    #[error("Unsupported qubit type '{0}'")]
    UnsupportedQubitType(String),
}

impl QubitError {
    pub(crate) fn invalid(name: &'static str, value: impl Display, reason: &'static str) -> Self {
        QubitError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Result type for qubit model operations.
pub type QubitResult<T> = Result<T, QubitError>;
