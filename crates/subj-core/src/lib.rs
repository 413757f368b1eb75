//! Core infrastructure for the subjective logic opinion algebra.
//!
//! Errors, layered configuration, tracing setup, and shared constants.
//! The algebra itself lives in `subj-algebra`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::SubjConfig;
pub use errors::{SubjError, SubjResult};
