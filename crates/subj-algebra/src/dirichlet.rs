//! Dirichlet PDF over a probability simplex.
//!
//! Strength is `alpha_i = evidence_i + base_rate_i * prior_weight`. Density
//! evaluation runs in log space through `ln_gamma` so large strengths do not
//! overflow the gamma function.

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;
use subj_core::config::NumericConfig;
use subj_core::constants::DEFAULT_DIRICHLET_PRIOR_WEIGHT;
use subj_core::errors::DirichletError;

use crate::opinion::write_tuple;

/// Evidence vector, base rate, and prior weight of a Dirichlet distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirichletPdf {
    evidence: Array1<f64>,
    base_rate: Array1<f64>,
    prior_weight: f64,
}

impl Default for DirichletPdf {
    fn default() -> Self {
        Self {
            evidence: Array1::zeros(0),
            base_rate: Array1::zeros(0),
            prior_weight: DEFAULT_DIRICHLET_PRIOR_WEIGHT,
        }
    }
}

impl DirichletPdf {
    /// Creates a PDF with the default prior weight of 2.
    pub fn new(evidence: &[f64], base_rate: &[f64]) -> Self {
        Self {
            evidence: Array1::from(evidence.to_vec()),
            base_rate: Array1::from(base_rate.to_vec()),
            prior_weight: DEFAULT_DIRICHLET_PRIOR_WEIGHT,
        }
    }

    /// Creates a PDF whose prior weight comes from the numeric config.
    pub fn from_config(evidence: &[f64], base_rate: &[f64], config: &NumericConfig) -> Self {
        Self::new(evidence, base_rate).with_prior_weight(config.effective_dirichlet_prior_weight())
    }

    pub(crate) fn from_arrays(evidence: Array1<f64>, base_rate: Array1<f64>, prior_weight: f64) -> Self {
        Self {
            evidence,
            base_rate,
            prior_weight,
        }
    }

    pub fn with_prior_weight(mut self, prior_weight: f64) -> Self {
        self.prior_weight = prior_weight;
        self
    }

    pub fn update_evidence(&mut self, evidence: &[f64]) {
        self.evidence = Array1::from(evidence.to_vec());
    }

    pub fn update_base_rate(&mut self, base_rate: &[f64]) {
        self.base_rate = Array1::from(base_rate.to_vec());
    }

    pub fn update_prior_weight(&mut self, prior_weight: f64) {
        self.prior_weight = prior_weight;
    }

    pub fn evidence(&self) -> Vec<f64> {
        self.evidence.to_vec()
    }

    pub fn evidence_array(&self) -> &Array1<f64> {
        &self.evidence
    }

    pub fn base_rate(&self) -> Vec<f64> {
        self.base_rate.to_vec()
    }

    pub fn base_rate_array(&self) -> &Array1<f64> {
        &self.base_rate
    }

    pub fn prior_weight(&self) -> f64 {
        self.prior_weight
    }

    /// Number of states, taken from the evidence vector.
    pub fn dimension(&self) -> usize {
        self.evidence.len()
    }

    /// `alpha = evidence + base_rate * prior_weight`.
    pub fn strength(&self) -> Result<Vec<f64>, DirichletError> {
        self.strength_array().map(|alpha| alpha.to_vec())
    }

    pub fn strength_array(&self) -> Result<Array1<f64>, DirichletError> {
        if self.evidence.is_empty() {
            return Err(DirichletError::EmptyDimension);
        }
        if self.base_rate.len() != self.evidence.len() {
            return Err(DirichletError::DimensionMismatch {
                context: "base rate",
                expected: self.evidence.len(),
                actual: self.base_rate.len(),
            });
        }
        Ok(&self.evidence + &(&self.base_rate * self.prior_weight))
    }

    /// Natural log of the density at `x`.
    ///
    /// Returns `-inf` where the density is zero (a zero coordinate under a
    /// strength above 1) and `+inf` at a pole (a zero coordinate under a
    /// strength below 1).
    pub fn log_density(&self, x: &[f64]) -> Result<f64, DirichletError> {
        let alpha = self.strength_array()?;
        if x.len() != alpha.len() {
            return Err(DirichletError::DimensionMismatch {
                context: "density point",
                expected: alpha.len(),
                actual: x.len(),
            });
        }
        for (index, &value) in alpha.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(DirichletError::NonPositiveStrength { index, value });
            }
        }
        if x.iter().any(|&xi| !(0.0..=1.0).contains(&xi)) {
            return Err(DirichletError::PointOutsideSimplex);
        }

        let mut log_density = ln_gamma(alpha.sum());
        for (&a, &xi) in alpha.iter().zip(x) {
            log_density -= ln_gamma(a);
            // x^0 == 1 for every x, including 0.
            if a == 1.0 {
                continue;
            }
            if xi == 0.0 {
                return Ok(if a > 1.0 {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                });
            }
            log_density += (a - 1.0) * xi.ln();
        }
        Ok(log_density)
    }

    /// Density at `x`. Every coordinate of `x` must lie in `[0, 1]`.
    pub fn density(&self, x: &[f64]) -> Result<f64, DirichletError> {
        self.log_density(x).map(f64::exp)
    }
}

impl fmt::Display for DirichletPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dir^e(W={}, r=", self.prior_weight)?;
        write_tuple(f, self.evidence.iter())?;
        write!(f, ", a=")?;
        write_tuple(f, self.base_rate.iter())?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn strength_adds_weighted_base_rate() {
        let pdf = DirichletPdf::new(&[1.0, 3.0], &[0.5, 0.5]);
        assert_eq!(pdf.strength().unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn strength_rejects_mismatched_base_rate() {
        let pdf = DirichletPdf::new(&[1.0, 3.0], &[1.0]);
        assert!(matches!(
            pdf.strength(),
            Err(DirichletError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn uniform_prior_density_is_one() {
        // alpha = (1, 1): the uniform density on the 1-simplex.
        let pdf = DirichletPdf::new(&[0.0, 0.0], &[0.5, 0.5]);
        assert_relative_eq!(pdf.density(&[0.3, 0.7]).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_density_matches_closed_form() {
        // alpha = (3, 2): Beta(3, 2) density is 12 x^2 (1 - x).
        let pdf = DirichletPdf::new(&[2.0, 1.0], &[0.5, 0.5]);
        let x = 0.6;
        let expected = 12.0 * x * x * (1.0 - x);
        assert_relative_eq!(pdf.density(&[x, 1.0 - x]).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn zero_coordinate_with_large_strength_is_zero() {
        let pdf = DirichletPdf::new(&[2.0, 1.0], &[0.5, 0.5]);
        assert_eq!(pdf.density(&[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn large_strengths_stay_finite() {
        let pdf = DirichletPdf::new(&[400.0, 600.0], &[0.5, 0.5]);
        let d = pdf.density(&[0.4, 0.6]).unwrap();
        assert!(d.is_finite() && d > 0.0);
    }

    #[test]
    fn point_outside_unit_interval_rejected() {
        let pdf = DirichletPdf::new(&[1.0, 1.0], &[0.5, 0.5]);
        assert_eq!(pdf.density(&[1.2, -0.2]), Err(DirichletError::PointOutsideSimplex));
    }

    #[test]
    fn non_positive_strength_rejected() {
        let pdf = DirichletPdf::new(&[0.0, 1.0], &[0.0, 1.0]).with_prior_weight(0.0);
        assert!(matches!(
            pdf.density(&[0.5, 0.5]),
            Err(DirichletError::NonPositiveStrength { index: 0, .. })
        ));
    }

    #[test]
    fn empty_pdf_rejected() {
        assert_eq!(DirichletPdf::default().density(&[]), Err(DirichletError::EmptyDimension));
    }

    #[test]
    fn display_names_every_field() {
        let pdf = DirichletPdf::new(&[1.0, 3.0], &[0.5, 0.5]);
        assert_eq!(pdf.to_string(), "Dir^e(W=2, r=(1, 3), a=(0.5, 0.5))");
    }

    #[test]
    fn prior_weight_from_config() {
        let config = NumericConfig {
            dirichlet_prior_weight: Some(4.0),
            ..Default::default()
        };
        let pdf = DirichletPdf::from_config(&[0.0, 0.0], &[0.5, 0.5], &config);
        assert_eq!(pdf.strength().unwrap(), vec![2.0, 2.0]);
    }
}
