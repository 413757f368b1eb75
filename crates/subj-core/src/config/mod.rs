//! Configuration system for the opinion algebra.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod histogram_config;
pub mod logging_config;
pub mod numeric_config;
pub mod subj_config;

pub use histogram_config::HistogramConfig;
pub use logging_config::LoggingConfig;
pub use numeric_config::NumericConfig;
pub use subj_config::{ConfigOverrides, SubjConfig};
