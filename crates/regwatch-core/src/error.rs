//! Validation errors for domain primitives.

use thiserror::Error;

/// Errors raised when constructing domain primitives from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An identifier was empty or whitespace-only.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Which identifier type rejected the input.
        kind: &'static str,
    },

    /// An identifier exceeded the maximum length.
    #[error("{kind} identifier exceeds {max} characters: {len}")]
    IdentifierTooLong {
        /// Which identifier type rejected the input.
        kind: &'static str,
        /// Maximum accepted length.
        max: usize,
        /// Actual length of the rejected input.
        len: usize,
    },

    /// A risk level string did not match any known level.
    #[error("unknown risk level: {0:?}")]
    UnknownRiskLevel(String),

    /// A source status string did not match any known status.
    #[error("unknown source status: {0:?}")]
    UnknownSourceStatus(String),
}
