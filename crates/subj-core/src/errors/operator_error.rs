//! Operator precondition errors.

use super::error_code::{self, SubjErrorCode};

/// Fatal precondition failures of the operator suite.
///
/// Operators never produce partial results: they either return a well-defined
/// opinion or one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperatorError {
    #[error("{operator} requires at least {required} opinions, got {given}")]
    InsufficientOpinions {
        operator: &'static str,
        required: usize,
        given: usize,
    },

    #[error("{operator}: all opinions must have the same dimension (expected {expected}, got {actual})")]
    DimensionMismatch {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{operator}: degenerate input, {reason}")]
    Degenerate {
        operator: &'static str,
        reason: String,
    },
}

impl OperatorError {
    /// Shorthand for a degenerate-input error.
    pub fn degenerate(operator: &'static str, reason: impl Into<String>) -> Self {
        Self::Degenerate {
            operator,
            reason: reason.into(),
        }
    }
}

impl SubjErrorCode for OperatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientOpinions { .. } => error_code::INSUFFICIENT_OPINIONS,
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::Degenerate { .. } => error_code::DEGENERATE_INPUT,
        }
    }
}
