//! Top-level error aggregating every subsystem.

use super::error_code::SubjErrorCode;
use super::{ConfigError, DirichletError, HistogramError, OperatorError, OpinionError};

/// Any error produced by the opinion algebra.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SubjError {
    #[error("Opinion error: {0}")]
    Opinion(#[from] OpinionError),

    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    #[error("Dirichlet error: {0}")]
    Dirichlet(#[from] DirichletError),

    #[error("Histogram error: {0}")]
    Histogram(#[from] HistogramError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SubjErrorCode for SubjError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Opinion(e) => e.error_code(),
            Self::Operator(e) => e.error_code(),
            Self::Dirichlet(e) => e.error_code(),
            Self::Histogram(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type SubjResult<T> = Result<T, SubjError>;
