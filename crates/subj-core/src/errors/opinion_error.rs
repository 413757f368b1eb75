//! Opinion construction and mutation errors.

use super::error_code::{self, SubjErrorCode};

/// Errors raised when building or mutating an opinion.
///
/// A mutator returning one of these leaves the opinion unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpinionError {
    #[error("Dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Opinion dimension must be greater than 0")]
    EmptyDimension,

    #[error("Evidence component {index} is infinite; no finite opinion corresponds to it")]
    InfiniteEvidence { index: usize },

    #[error("Hyper-opinion domain of {dimension} states is too large")]
    DimensionOverflow { dimension: usize },
}

impl SubjErrorCode for OpinionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            _ => error_code::OPINION_ERROR,
        }
    }
}
