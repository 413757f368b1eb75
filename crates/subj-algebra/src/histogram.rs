//! Fixed-width histogram used as an evidence source for Dirichlet PDFs.
//!
//! Bin `i` covers `[min + i w, min + (i + 1) w)` with `w = (max - min) / bins`.
//! Values below the range fall into the first bin and values at or above
//! the top edge fall into the last.

use serde::{Deserialize, Serialize};
use subj_core::config::HistogramConfig;
use subj_core::errors::{DirichletError, HistogramError};
use tracing::debug;

use crate::dirichlet::DirichletPdf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct Histogram {
    min: f64,
    width: f64,
    counts: Vec<u64>,
    intervals: Vec<(f64, f64)>,
    data_size: u64,
}

#[derive(Deserialize)]
struct RawHistogram {
    min: f64,
    width: f64,
    counts: Vec<u64>,
    data_size: u64,
}

impl TryFrom<RawHistogram> for Histogram {
    type Error = HistogramError;

    /// Intervals are rebuilt from `min` and `width`, and the data size is
    /// recounted from the bins.
    fn try_from(raw: RawHistogram) -> Result<Self, Self::Error> {
        let bins = raw.counts.len();
        if bins == 0 {
            return Err(HistogramError::NoBins);
        }
        let max = raw.min + raw.width * bins as f64;
        if !(raw.width.is_finite() && raw.width > 0.0 && raw.min.is_finite() && max.is_finite()) {
            return Err(HistogramError::InvalidRange { min: raw.min, max });
        }
        let data_size: u64 = raw.counts.iter().sum();
        if data_size != raw.data_size {
            debug!(stored = raw.data_size, counted = data_size, "histogram data size recounted");
        }
        Ok(Self {
            min: raw.min,
            width: raw.width,
            intervals: Self::intervals_for(bins, raw.min, raw.width),
            counts: raw.counts,
            data_size,
        })
    }
}

impl Histogram {
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self, HistogramError> {
        if bins == 0 {
            return Err(HistogramError::NoBins);
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(HistogramError::InvalidRange { min, max });
        }
        let width = (max - min) / bins as f64;
        Ok(Self {
            min,
            width,
            counts: vec![0; bins],
            intervals: Self::intervals_for(bins, min, width),
            data_size: 0,
        })
    }

    fn intervals_for(bins: usize, min: f64, width: f64) -> Vec<(f64, f64)> {
        (0..bins)
            .map(|i| (min + width * i as f64, min + width * (i + 1) as f64))
            .collect()
    }

    /// Empty histogram with the configured default bin count.
    pub fn with_config(config: &HistogramConfig, min: f64, max: f64) -> Result<Self, HistogramError> {
        Self::new(config.effective_default_bins(), min, max)
    }

    /// Histogram spanning the data's own minimum and maximum.
    pub fn from_data(bins: usize, data: &[f64]) -> Result<Self, HistogramError> {
        if data.is_empty() {
            return Err(HistogramError::EmptyData);
        }
        let (min, max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self::from_data_in_range(bins, data, min, max)
    }

    pub fn from_data_in_range(bins: usize, data: &[f64], min: f64, max: f64) -> Result<Self, HistogramError> {
        let mut histogram = Self::new(bins, min, max)?;
        histogram.extend(data);
        debug!(bins, values = data.len(), "histogram filled");
        Ok(histogram)
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Bin a value falls into, clamped to the first and last bins.
    pub fn bin_index(&self, value: f64) -> usize {
        let last = self.counts.len() - 1;
        let position = ((value - self.min) / self.width).floor();
        if position.is_nan() || position < 0.0 {
            0
        } else if position >= last as f64 {
            last
        } else {
            position as usize
        }
    }

    pub fn insert(&mut self, value: f64) {
        let bin = self.bin_index(value);
        self.counts[bin] += 1;
        self.data_size += 1;
    }

    pub fn insert_into_bin(&mut self, bin: usize) -> Result<(), HistogramError> {
        let bins = self.counts.len();
        let count = self
            .counts
            .get_mut(bin)
            .ok_or(HistogramError::BinOutOfRange { bin, bins })?;
        *count += 1;
        self.data_size += 1;
        Ok(())
    }

    pub fn extend(&mut self, values: &[f64]) {
        for &value in values {
            self.insert(value);
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    /// Counts divided by the number of inserted values. All zeros while empty.
    pub fn normalized(&self) -> Vec<f64> {
        if self.data_size == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = self.data_size as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Bin counts as Dirichlet evidence. A missing base rate means uniform.
    pub fn to_dirichlet_pdf(
        &self,
        base_rate: Option<&[f64]>,
        prior_weight: f64,
    ) -> Result<DirichletPdf, DirichletError> {
        let bins = self.counts.len();
        let base_rate = match base_rate {
            Some(rate) if rate.len() != bins => {
                return Err(DirichletError::DimensionMismatch {
                    context: "histogram base rate",
                    expected: bins,
                    actual: rate.len(),
                });
            }
            Some(rate) => rate.to_vec(),
            None => vec![1.0 / bins as f64; bins],
        };
        let evidence: Vec<f64> = self.counts.iter().map(|&c| c as f64).collect();
        Ok(DirichletPdf::new(&evidence, &base_rate).with_prior_weight(prior_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_split_range_evenly() {
        let h = Histogram::new(4, 0.0, 1.0).unwrap();
        assert_eq!(h.intervals()[1], (0.25, 0.5));
        assert_eq!(h.bins(), 4);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let mut h = Histogram::new(4, 0.0, 1.0).unwrap();
        h.extend(&[-3.0, 0.1, 0.3, 1.0, 7.0]);
        assert_eq!(h.counts(), &[2, 1, 0, 2]);
        assert_eq!(h.data_size(), 5);
    }

    #[test]
    fn from_data_uses_extremes() {
        let h = Histogram::from_data(2, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(h.intervals(), &[(1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(h.counts(), &[1, 2]);
    }

    #[test]
    fn constant_data_has_no_range() {
        assert!(matches!(
            Histogram::from_data(3, &[5.0, 5.0]),
            Err(HistogramError::InvalidRange { .. })
        ));
        assert_eq!(Histogram::from_data(3, &[]), Err(HistogramError::EmptyData));
    }

    #[test]
    fn zero_bins_rejected() {
        assert_eq!(Histogram::new(0, 0.0, 1.0), Err(HistogramError::NoBins));
    }

    #[test]
    fn insert_into_bin_checks_bounds() {
        let mut h = Histogram::new(2, 0.0, 1.0).unwrap();
        h.insert_into_bin(1).unwrap();
        assert_eq!(
            h.insert_into_bin(2),
            Err(HistogramError::BinOutOfRange { bin: 2, bins: 2 })
        );
        assert_eq!(h.normalized(), vec![0.0, 1.0]);
    }

    #[test]
    fn default_bins_from_config() {
        let h = Histogram::with_config(&HistogramConfig::default(), 0.0, 1.0).unwrap();
        assert_eq!(h.bins(), 10);
    }

    #[test]
    fn serde_round_trip_keeps_counts() {
        let mut h = Histogram::new(3, -1.0, 2.0).unwrap();
        h.extend(&[-0.5, 0.5, 0.6, 1.9]);
        let json = serde_json::to_string(&h).unwrap();
        let back: Histogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counts(), &[1, 2, 1]);
        assert_eq!(back.data_size(), 4);
        assert_eq!(back, h);
    }

    #[test]
    fn deserialize_rejects_empty_bins() {
        let mut json = serde_json::to_value(Histogram::new(2, 0.0, 1.0).unwrap()).unwrap();
        json["counts"] = serde_json::json!([]);
        let err = serde_json::from_value::<Histogram>(json).unwrap_err();
        assert_eq!(err.to_string(), HistogramError::NoBins.to_string());
    }

    #[test]
    fn deserialize_rejects_non_positive_width() {
        let mut json = serde_json::to_value(Histogram::new(2, 0.0, 1.0).unwrap()).unwrap();
        json["width"] = serde_json::json!(0.0);
        assert!(serde_json::from_value::<Histogram>(json).is_err());
    }

    #[test]
    fn counts_become_evidence() {
        let mut h = Histogram::new(2, 0.0, 1.0).unwrap();
        h.extend(&[0.1, 0.2, 0.9]);
        let pdf = h.to_dirichlet_pdf(None, 2.0).unwrap();
        assert_eq!(pdf.evidence(), vec![2.0, 1.0]);
        assert_eq!(pdf.base_rate(), vec![0.5, 0.5]);
        assert_eq!(pdf.strength().unwrap(), vec![3.0, 2.0]);
        assert!(h.to_dirichlet_pdf(Some(&[1.0]), 2.0).is_err());
    }
}
