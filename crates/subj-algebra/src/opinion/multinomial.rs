//! Multinomial opinion over `n` mutually exclusive states.
//!
//! The triple (belief, uncertainty, base rate) is the canonical state. The
//! dimension starts unset on a default opinion and is fixed by the first
//! belief or base-rate assignment. Once fixed, every later vector update
//! must match it exactly.

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use subj_core::errors::OpinionError;

use super::owner::OpinionOwner;
use super::write_tuple;
use crate::dirichlet::DirichletPdf;

/// Belief vector, uncertainty mass, and base rate over `n` states.
///
/// Consistency means `sum(belief) + uncertainty == 1`. Uncertainty updates
/// enforce it by correction: a requested value that breaks the sum is
/// replaced by `1 - sum(belief)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultinomialOpinion")]
pub struct MultinomialOpinion {
    belief: Array1<f64>,
    uncertainty: f64,
    base_rate: Array1<f64>,
    prior_weight: f64,
    dimension: Option<usize>,
    owner: Option<OpinionOwner>,
}

/// Serialized form, checked before it becomes an opinion.
#[derive(Deserialize)]
struct RawMultinomialOpinion {
    belief: Array1<f64>,
    uncertainty: f64,
    base_rate: Array1<f64>,
    dimension: Option<usize>,
    #[serde(default)]
    owner: Option<OpinionOwner>,
}

impl TryFrom<RawMultinomialOpinion> for MultinomialOpinion {
    type Error = OpinionError;

    fn try_from(raw: RawMultinomialOpinion) -> Result<Self, Self::Error> {
        let n = raw.belief.len();
        if n == 0 && raw.base_rate.is_empty() && raw.dimension.is_none() {
            let mut opinion = Self::default();
            opinion.owner = raw.owner;
            return Ok(opinion);
        }
        if n == 0 {
            return Err(OpinionError::EmptyDimension);
        }
        if raw.base_rate.len() != n {
            return Err(OpinionError::DimensionMismatch {
                context: "base rate",
                expected: n,
                actual: raw.base_rate.len(),
            });
        }
        if raw.dimension != Some(n) {
            return Err(OpinionError::DimensionMismatch {
                context: "stored dimension",
                expected: n,
                actual: raw.dimension.unwrap_or(0),
            });
        }
        // The stored uncertainty is kept as written; no correction on load.
        Ok(Self {
            belief: raw.belief,
            uncertainty: raw.uncertainty,
            base_rate: raw.base_rate,
            prior_weight: n as f64,
            dimension: Some(n),
            owner: raw.owner,
        })
    }
}

impl Default for MultinomialOpinion {
    /// An empty opinion with no dimension yet.
    fn default() -> Self {
        Self {
            belief: Array1::zeros(0),
            uncertainty: 1.0,
            base_rate: Array1::zeros(0),
            prior_weight: 0.0,
            dimension: None,
            owner: None,
        }
    }
}

impl MultinomialOpinion {
    /// Builds an opinion from its triple. The dimension is fixed to
    /// `belief.len()` and the uncertainty is corrected if the sum is off.
    pub fn new(belief: &[f64], uncertainty: f64, base_rate: &[f64]) -> Result<Self, OpinionError> {
        if belief.is_empty() {
            return Err(OpinionError::EmptyDimension);
        }
        if base_rate.len() != belief.len() {
            return Err(OpinionError::DimensionMismatch {
                context: "base rate",
                expected: belief.len(),
                actual: base_rate.len(),
            });
        }
        Ok(Self::from_parts(
            Array1::from(belief.to_vec()),
            uncertainty,
            Array1::from(base_rate.to_vec()),
        ))
    }

    /// Vacuous opinion: zero belief, full uncertainty, uniform base rate.
    pub fn vacuous(dimension: usize) -> Result<Self, OpinionError> {
        if dimension == 0 {
            return Err(OpinionError::EmptyDimension);
        }
        Ok(Self::from_parts(
            Array1::zeros(dimension),
            1.0,
            Array1::from_elem(dimension, 1.0 / dimension as f64),
        ))
    }

    /// Reconstructs an opinion from a Dirichlet PDF.
    pub fn from_pdf(pdf: &DirichletPdf) -> Result<Self, OpinionError> {
        let mut opinion = Self::default();
        opinion.update_from_pdf(pdf)?;
        Ok(opinion)
    }

    /// Operator-side constructor. Callers guarantee `belief` and `base_rate`
    /// have the same non-zero length.
    pub(crate) fn from_parts(belief: Array1<f64>, uncertainty: f64, base_rate: Array1<f64>) -> Self {
        let n = belief.len();
        let mut opinion = Self {
            belief,
            uncertainty: 1.0,
            base_rate,
            prior_weight: n as f64,
            dimension: Some(n),
            owner: None,
        };
        opinion.update_uncertainty(uncertainty);
        opinion
    }

    pub fn with_owner(mut self, owner: impl Into<OpinionOwner>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    // ---- accessors ----

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Dimension, or 0 while unset.
    pub fn dim(&self) -> usize {
        self.dimension.unwrap_or(0)
    }

    pub fn belief(&self) -> Vec<f64> {
        self.belief.to_vec()
    }

    pub fn belief_array(&self) -> &Array1<f64> {
        &self.belief
    }

    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn base_rate(&self) -> Vec<f64> {
        self.base_rate.to_vec()
    }

    pub fn base_rate_array(&self) -> &Array1<f64> {
        &self.base_rate
    }

    /// Non-informative prior weight `W`, equal to the dimension.
    pub fn prior_weight(&self) -> f64 {
        self.prior_weight
    }

    pub fn owner(&self) -> Option<&OpinionOwner> {
        self.owner.as_ref()
    }

    pub fn update_owner(&mut self, owner: Option<OpinionOwner>) {
        self.owner = owner;
    }

    // ---- mutators ----

    /// Replaces the belief vector and re-derives uncertainty as
    /// `1 - sum(belief)`. Adopts the dimension if it is still unset.
    pub fn update_belief(&mut self, belief: &[f64]) -> Result<(), OpinionError> {
        self.check_vector("belief", belief.len())?;
        if self.dimension.is_none() {
            self.adopt_dimension(belief.len());
        }
        self.belief = Array1::from(belief.to_vec());
        self.uncertainty = 1.0 - self.belief.sum();
        Ok(())
    }

    /// Stores `uncertainty` if it completes the belief sum to exactly 1,
    /// otherwise stores `1 - sum(belief)`.
    pub fn update_uncertainty(&mut self, uncertainty: f64) {
        let belief_sum = self.belief.sum();
        self.uncertainty = if belief_sum + uncertainty == 1.0 {
            uncertainty
        } else {
            1.0 - belief_sum
        };
    }

    /// Replaces the base rate. Adopts the dimension if it is still unset,
    /// leaving a vacuous belief.
    pub fn update_base_rate(&mut self, base_rate: &[f64]) -> Result<(), OpinionError> {
        self.check_vector("base rate", base_rate.len())?;
        if self.dimension.is_none() {
            self.adopt_dimension(base_rate.len());
        }
        self.base_rate = Array1::from(base_rate.to_vec());
        Ok(())
    }

    /// Replaces the whole triple. Nothing changes unless both vectors are
    /// accepted.
    pub fn update(&mut self, belief: &[f64], uncertainty: f64, base_rate: &[f64]) -> Result<(), OpinionError> {
        self.check_vector("belief", belief.len())?;
        if base_rate.len() != belief.len() {
            return Err(OpinionError::DimensionMismatch {
                context: "base rate",
                expected: belief.len(),
                actual: base_rate.len(),
            });
        }
        self.update_belief(belief)?;
        self.update_base_rate(base_rate)?;
        self.update_uncertainty(uncertainty);
        Ok(())
    }

    /// Replaces the triple with the opinion dual to `pdf`, using `W = n`.
    pub fn update_from_pdf(&mut self, pdf: &DirichletPdf) -> Result<(), OpinionError> {
        let evidence = pdf.evidence_array();
        let base_rate = pdf.base_rate_array();
        self.check_vector("dirichlet evidence", evidence.len())?;
        if base_rate.len() != evidence.len() {
            return Err(OpinionError::DimensionMismatch {
                context: "dirichlet base rate",
                expected: evidence.len(),
                actual: base_rate.len(),
            });
        }
        if let Some(index) = evidence.iter().position(|e| e.is_infinite()) {
            return Err(OpinionError::InfiniteEvidence { index });
        }

        let n = evidence.len();
        let weight = n as f64;
        let total = weight + evidence.sum();
        self.belief = evidence / total;
        self.uncertainty = weight / total;
        self.base_rate = base_rate.clone();
        self.prior_weight = weight;
        self.dimension = Some(n);
        Ok(())
    }

    fn check_vector(&self, context: &'static str, len: usize) -> Result<(), OpinionError> {
        if len == 0 {
            return Err(OpinionError::EmptyDimension);
        }
        match self.dimension {
            Some(expected) if expected != len => Err(OpinionError::DimensionMismatch {
                context,
                expected,
                actual: len,
            }),
            _ => Ok(()),
        }
    }

    fn adopt_dimension(&mut self, n: usize) {
        self.dimension = Some(n);
        self.prior_weight = n as f64;
        self.belief = Array1::zeros(n);
        self.uncertainty = 1.0;
        self.base_rate = Array1::from_elem(n, 1.0 / n as f64);
    }

    /// Copy of this opinion under a different base rate, without owner.
    pub fn with_base_rate(&self, base_rate: &[f64]) -> Result<Self, OpinionError> {
        if base_rate.len() != self.dim() {
            return Err(OpinionError::DimensionMismatch {
                context: "base rate",
                expected: self.dim(),
                actual: base_rate.len(),
            });
        }
        Ok(self.rebased(&Array1::from(base_rate.to_vec())))
    }

    /// [`Self::with_base_rate`] for a length the caller has already checked.
    pub(crate) fn rebased(&self, base_rate: &Array1<f64>) -> Self {
        Self {
            base_rate: base_rate.clone(),
            owner: None,
            ..self.clone()
        }
    }

    // ---- derived quantities ----

    /// Projected probability `p = belief + base_rate * uncertainty`.
    pub fn projection(&self) -> Vec<f64> {
        self.projection_array().to_vec()
    }

    pub fn projection_array(&self) -> Array1<f64> {
        &self.belief + &(&self.base_rate * self.uncertainty)
    }

    /// Per-state variance `p(1 - p) u / (W u)`.
    ///
    /// The expression is kept unsimplified, so a dogmatic opinion (`u = 0`)
    /// yields NaN components.
    pub fn variance(&self) -> Vec<f64> {
        self.variance_array().to_vec()
    }

    pub fn variance_array(&self) -> Array1<f64> {
        let u = self.uncertainty;
        let w = self.prior_weight;
        self.projection_array().mapv(|p| p * (1.0 - p) * u / (w * u))
    }

    /// Largest uncertainty this opinion could hold with the same projection:
    /// `min(p_i / a_i)` over states with positive base rate, capped at 1.
    pub fn uncertainty_maximum(&self) -> f64 {
        self.projection_array()
            .iter()
            .zip(self.base_rate.iter())
            .filter(|(_, &a)| a > 0.0)
            .map(|(&p, &a)| p / a)
            .fold(1.0, f64::min)
    }

    /// Dual Dirichlet PDF with evidence `W b / u` and `W = n`.
    ///
    /// A dogmatic opinion maps believed states to infinite evidence and
    /// unbelieved states to zero evidence.
    pub fn dirichlet_pdf(&self) -> DirichletPdf {
        let w = self.prior_weight;
        let u = self.uncertainty;
        let evidence = self.belief.mapv(|b| {
            if u > 0.0 {
                w * b / u
            } else if b > 0.0 {
                f64::INFINITY
            } else {
                0.0
            }
        });
        DirichletPdf::from_arrays(evidence, self.base_rate.clone(), w)
    }

    pub fn is_vacuous(&self, tolerance: f64) -> bool {
        (self.uncertainty - 1.0).abs() <= tolerance
    }

    pub fn is_dogmatic(&self, tolerance: f64) -> bool {
        self.uncertainty.abs() <= tolerance
    }

    /// Checks the additivity invariant `sum(b) + u == 1` within `tolerance`.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        (self.belief.sum() + self.uncertainty - 1.0).abs() <= tolerance
    }
}

impl AsRef<MultinomialOpinion> for MultinomialOpinion {
    fn as_ref(&self) -> &MultinomialOpinion {
        self
    }
}

impl fmt::Display for MultinomialOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(b=")?;
        write_tuple(f, self.belief.iter())?;
        write!(f, ", u={}, a=", self.uncertainty)?;
        write_tuple(f, self.base_rate.iter())?;
        write!(f, ")")
    }
}
