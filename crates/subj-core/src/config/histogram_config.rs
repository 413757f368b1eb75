//! Histogram configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HISTOGRAM_BINS;

/// Settings for evidence histograms.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HistogramConfig {
    /// Number of bins when the caller does not choose one. Default: 10.
    pub default_bins: Option<usize>,
}

impl HistogramConfig {
    pub fn effective_default_bins(&self) -> usize {
        self.default_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS)
    }
}
