//! Histogram errors.

use super::error_code::{self, SubjErrorCode};

/// Errors that can occur while building or filling a histogram.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistogramError {
    #[error("Histogram needs at least one bin")]
    NoBins,

    #[error("Invalid histogram range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("Bin {bin} out of range (bins={bins})")]
    BinOutOfRange { bin: usize, bins: usize },

    #[error("Cannot derive a histogram range from empty data")]
    EmptyData,
}

impl SubjErrorCode for HistogramError {
    fn error_code(&self) -> &'static str {
        error_code::HISTOGRAM_ERROR
    }
}
