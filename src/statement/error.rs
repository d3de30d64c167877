//! Error types for statement construction.

use thiserror::Error;

/// Errors raised while building a [`Statement`](super::Statement).
///
/// Statements are validated when they are constructed, so rendering never
/// fails; these errors are the only way a malformed statement surfaces.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StatementError {
    /// Raised when a required field is missing, blank, or malformed.
    #[error("invalid statement field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Raised when a body line would terminate the heredoc or console block
    /// early.
    #[error("body line {line} collides with the block terminator `{delimiter}`")]
    DelimiterCollision {
        /// Terminator the line collides with.
        delimiter: String,
        /// One-based index of the colliding body line.
        line: usize,
    },
}

impl StatementError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
