//! Dirichlet PDF evaluation errors.

use super::error_code::{self, SubjErrorCode};

/// Errors that can occur when evaluating a Dirichlet density.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirichletError {
    #[error("Dirichlet PDF has no dimensions")]
    EmptyDimension,

    #[error("Dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Strength component {index} must be finite and positive, got {value}")]
    NonPositiveStrength { index: usize, value: f64 },

    #[error("Point is not on the probability simplex")]
    PointOutsideSimplex,
}

impl SubjErrorCode for DirichletError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            _ => error_code::DIRICHLET_ERROR,
        }
    }
}
