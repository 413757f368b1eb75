//! SubjErrorCode trait for the binding boundary.

/// Trait for converting algebra errors to stable error codes.
/// Every error enum implements this so a scripting binding can map
/// failures without parsing messages.
pub trait SubjErrorCode {
    /// Returns the error code string (e.g., "OPERATOR_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the binding boundary.
pub const OPINION_ERROR: &str = "OPINION_ERROR";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const OPERATOR_ERROR: &str = "OPERATOR_ERROR";
pub const INSUFFICIENT_OPINIONS: &str = "INSUFFICIENT_OPINIONS";
pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
pub const DIRICHLET_ERROR: &str = "DIRICHLET_ERROR";
pub const HISTOGRAM_ERROR: &str = "HISTOGRAM_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
