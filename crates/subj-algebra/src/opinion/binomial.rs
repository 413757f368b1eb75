//! Binomial opinion: a multinomial opinion fixed at two states.

use std::fmt;

use ndarray::array;
use serde::{Deserialize, Serialize};
use subj_core::errors::OpinionError;

use super::multinomial::MultinomialOpinion;
use super::owner::OpinionOwner;
use crate::dirichlet::DirichletPdf;

/// Belief, disbelief, uncertainty, and the base rate of the first state.
///
/// Stored as a 2-state [`MultinomialOpinion`] with belief `(b, d)` and base
/// rate `(a, 1 - a)`, so every multinomial operator accepts it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MultinomialOpinion", into = "MultinomialOpinion")]
pub struct BinomialOpinion {
    inner: MultinomialOpinion,
}

impl Default for BinomialOpinion {
    /// Vacuous with base rate 0.5.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.5)
    }
}

impl BinomialOpinion {
    pub fn new(belief: f64, disbelief: f64, uncertainty: f64, base_rate: f64) -> Self {
        Self {
            inner: MultinomialOpinion::from_parts(
                array![belief, disbelief],
                uncertainty,
                array![base_rate, 1.0 - base_rate],
            ),
        }
    }

    pub fn with_owner(self, owner: impl Into<OpinionOwner>) -> Self {
        Self {
            inner: self.inner.with_owner(owner),
        }
    }

    pub fn belief(&self) -> f64 {
        self.inner.belief_array()[0]
    }

    pub fn disbelief(&self) -> f64 {
        self.inner.belief_array()[1]
    }

    pub fn uncertainty(&self) -> f64 {
        self.inner.uncertainty()
    }

    pub fn base_rate(&self) -> f64 {
        self.inner.base_rate_array()[0]
    }

    /// Projected probability of the first state, `b + a u`.
    pub fn projection(&self) -> f64 {
        self.belief() + self.base_rate() * self.uncertainty()
    }

    /// Variance of the first state under the dual Beta distribution.
    pub fn variance(&self) -> f64 {
        self.inner.variance_array()[0]
    }

    pub fn dirichlet_pdf(&self) -> DirichletPdf {
        self.inner.dirichlet_pdf()
    }

    pub fn owner(&self) -> Option<&OpinionOwner> {
        self.inner.owner()
    }

    pub fn update(&mut self, belief: f64, disbelief: f64, uncertainty: f64, base_rate: f64) {
        let owner = self.inner.owner().cloned();
        self.inner = MultinomialOpinion::from_parts(
            array![belief, disbelief],
            uncertainty,
            array![base_rate, 1.0 - base_rate],
        );
        self.inner.update_owner(owner);
    }

    /// Sets belief and re-derives uncertainty as `1 - b - d`.
    pub fn update_belief(&mut self, belief: f64) {
        let disbelief = self.disbelief();
        self.set_pair(belief, disbelief);
    }

    /// Sets disbelief and re-derives uncertainty as `1 - b - d`.
    pub fn update_disbelief(&mut self, disbelief: f64) {
        let belief = self.belief();
        self.set_pair(belief, disbelief);
    }

    pub fn update_uncertainty(&mut self, uncertainty: f64) {
        self.inner.update_uncertainty(uncertainty);
    }

    pub fn update_base_rate(&mut self, base_rate: f64) {
        self.set_inner(|inner| inner.update_base_rate(&[base_rate, 1.0 - base_rate]));
    }

    fn set_pair(&mut self, belief: f64, disbelief: f64) {
        self.set_inner(|inner| inner.update_belief(&[belief, disbelief]));
    }

    // The dimension is always 2, so the two-element updates cannot fail.
    fn set_inner(&mut self, update: impl FnOnce(&mut MultinomialOpinion) -> Result<(), OpinionError>) {
        let applied = update(&mut self.inner);
        debug_assert!(applied.is_ok());
    }

    pub fn as_multinomial(&self) -> &MultinomialOpinion {
        &self.inner
    }

    pub fn into_multinomial(self) -> MultinomialOpinion {
        self.inner
    }
}

impl AsRef<MultinomialOpinion> for BinomialOpinion {
    fn as_ref(&self) -> &MultinomialOpinion {
        &self.inner
    }
}

impl From<BinomialOpinion> for MultinomialOpinion {
    fn from(opinion: BinomialOpinion) -> Self {
        opinion.inner
    }
}

impl TryFrom<MultinomialOpinion> for BinomialOpinion {
    type Error = OpinionError;

    fn try_from(opinion: MultinomialOpinion) -> Result<Self, Self::Error> {
        let lengths = [
            opinion.dim(),
            opinion.belief_array().len(),
            opinion.base_rate_array().len(),
        ];
        match lengths.iter().find(|&&len| len != 2) {
            None => Ok(Self { inner: opinion }),
            Some(&actual) => Err(OpinionError::DimensionMismatch {
                context: "binomial opinion",
                expected: 2,
                actual,
            }),
        }
    }
}

impl fmt::Display for BinomialOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(b={}, d={}, u={}, a={})",
            self.belief(),
            self.disbelief(),
            self.uncertainty(),
            self.base_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_vacuous_half() {
        let op = BinomialOpinion::default();
        assert_eq!(op.belief(), 0.0);
        assert_eq!(op.disbelief(), 0.0);
        assert_eq!(op.uncertainty(), 1.0);
        assert_eq!(op.base_rate(), 0.5);
        assert_eq!(op.projection(), 0.5);
    }

    #[test]
    fn scalar_setters_rederive_uncertainty() {
        let mut op = BinomialOpinion::default();
        op.update_belief(0.5);
        op.update_disbelief(0.25);
        assert_relative_eq!(op.uncertainty(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn base_rate_mirrors_second_state() {
        let mut op = BinomialOpinion::default();
        op.update_base_rate(0.2);
        assert_relative_eq!(op.as_multinomial().base_rate()[1], 0.8, epsilon = 1e-12);
    }

    #[test]
    fn update_keeps_owner() {
        let mut op = BinomialOpinion::default().with_owner("alice");
        op.update(0.6, 0.2, 0.2, 0.5);
        assert_eq!(op.owner().map(OpinionOwner::as_str), Some("alice"));
        assert_relative_eq!(op.projection(), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn try_from_requires_two_states() {
        let three = MultinomialOpinion::vacuous(3).unwrap();
        assert!(BinomialOpinion::try_from(three).is_err());
        let two = MultinomialOpinion::vacuous(2).unwrap();
        assert!(BinomialOpinion::try_from(two).is_ok());
    }

    #[test]
    fn variance_of_first_state() {
        // p = 0.1 + 0.5 * 0.4 = 0.3, W = 2
        let op = BinomialOpinion::new(0.1, 0.5, 0.4, 0.5);
        assert_relative_eq!(op.variance(), 0.105, epsilon = 1e-12);
        assert!(BinomialOpinion::new(1.0, 0.0, 0.0, 0.5).variance().is_nan());
    }

    #[test]
    fn deserialize_rejects_three_state_base_rate() {
        let op = BinomialOpinion::new(0.2, 0.3, 0.5, 0.2);
        let mut json = serde_json::to_value(&op).unwrap();
        json["base_rate"] = serde_json::to_value(ndarray::Array1::from(vec![0.2, 0.3, 0.5])).unwrap();
        assert!(serde_json::from_value::<BinomialOpinion>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_three_state_opinion() {
        let three = MultinomialOpinion::vacuous(3).unwrap();
        let json = serde_json::to_string(&three).unwrap();
        let err = serde_json::from_str::<BinomialOpinion>(&json).unwrap_err();
        assert!(err.to_string().contains("binomial opinion"));
    }

    #[test]
    fn serde_goes_through_multinomial() {
        let op = BinomialOpinion::new(0.6, 0.2, 0.2, 0.3);
        let json = serde_json::to_string(&op).unwrap();
        let back: BinomialOpinion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn display_shows_scalars() {
        let op = BinomialOpinion::new(0.5, 0.25, 0.25, 0.5);
        assert_eq!(op.to_string(), "(b=0.5, d=0.25, u=0.25, a=0.5)");
    }
}
