//! Numeric configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DIRICHLET_PRIOR_WEIGHT, DEFAULT_TOLERANCE};

/// Numeric settings consumed by the operator suite.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NumericConfig {
    /// Tolerance for vanishing denominators and vacuous/dogmatic detection. Default: 1e-12.
    pub tolerance: Option<f64>,
    /// Prior weight of free-standing Dirichlet PDFs. Default: 2.0.
    pub dirichlet_prior_weight: Option<f64>,
}

impl NumericConfig {
    /// Returns the effective tolerance, defaulting to 1e-12.
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    /// Returns the effective Dirichlet prior weight, defaulting to 2.0.
    pub fn effective_dirichlet_prior_weight(&self) -> f64 {
        self.dirichlet_prior_weight
            .unwrap_or(DEFAULT_DIRICHLET_PRIOR_WEIGHT)
    }
}
