//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{HistogramConfig, LoggingConfig, NumericConfig};
use crate::errors::ConfigError;

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "subj.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SUBJ_*`)
/// 3. Project config (`subj.toml` in the project root)
/// 4. User config (`~/.subj/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SubjConfig {
    pub numeric: NumericConfig,
    pub histogram: HistogramConfig,
    pub logging: LoggingConfig,
}

/// Override arguments that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tolerance: Option<f64>,
    pub dirichlet_prior_weight: Option<f64>,
    pub histogram_bins: Option<usize>,
    pub log_filter: Option<String>,
}

impl SubjConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { path, message }) => {
                        return Err(ConfigError::ParseError { path, message });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): programmatic overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SubjConfig) -> Result<(), ConfigError> {
        if let Some(tolerance) = config.numeric.tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "numeric.tolerance".to_string(),
                    message: "must be finite and in (0, 1)".to_string(),
                });
            }
        }
        if let Some(weight) = config.numeric.dirichlet_prior_weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "numeric.dirichlet_prior_weight".to_string(),
                    message: "must be finite and greater than 0".to_string(),
                });
            }
        }
        if config.histogram.default_bins == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "histogram.default_bins".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.subj/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".subj").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SubjConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SubjConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SubjConfig, other: &SubjConfig) {
        if other.numeric.tolerance.is_some() {
            base.numeric.tolerance = other.numeric.tolerance;
        }
        if other.numeric.dirichlet_prior_weight.is_some() {
            base.numeric.dirichlet_prior_weight = other.numeric.dirichlet_prior_weight;
        }
        if other.histogram.default_bins.is_some() {
            base.histogram.default_bins = other.histogram.default_bins;
        }
        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SUBJ_NUMERIC_TOLERANCE`, `SUBJ_HISTOGRAM_DEFAULT_BINS`, etc.
    fn apply_env_overrides(config: &mut SubjConfig) {
        if let Ok(val) = std::env::var("SUBJ_NUMERIC_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.numeric.tolerance = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SUBJ_NUMERIC_DIRICHLET_PRIOR_WEIGHT") {
            if let Ok(v) = val.parse::<f64>() {
                config.numeric.dirichlet_prior_weight = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SUBJ_HISTOGRAM_DEFAULT_BINS") {
            if let Ok(v) = val.parse::<usize>() {
                config.histogram.default_bins = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SUBJ_LOGGING_FILTER") {
            config.logging.filter = Some(val);
        }
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut SubjConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.tolerance {
            config.numeric.tolerance = Some(v);
        }
        if let Some(v) = overrides.dirichlet_prior_weight {
            config.numeric.dirichlet_prior_weight = Some(v);
        }
        if let Some(v) = overrides.histogram_bins {
            config.histogram.default_bins = Some(v);
        }
        if let Some(ref v) = overrides.log_filter {
            config.logging.filter = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
