//! Error handling for the opinion algebra.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dirichlet_error;
pub mod error_code;
pub mod histogram_error;
pub mod operator_error;
pub mod opinion_error;
pub mod subj_error;

pub use config_error::ConfigError;
pub use dirichlet_error::DirichletError;
pub use error_code::SubjErrorCode;
pub use histogram_error::HistogramError;
pub use operator_error::OperatorError;
pub use opinion_error::OpinionError;
pub use subj_error::{SubjError, SubjResult};
