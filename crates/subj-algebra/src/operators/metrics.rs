//! Distance and conflict measures between two opinions.

use subj_core::errors::OperatorError;
use tracing::debug;

use super::{common_dimension, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// `sum_i |p_a(i) - p_b(i)| / 2`.
    pub fn projected_distance<A, B>(&self, a: &A, b: &B) -> Result<f64, OperatorError>
    where
        A: AsRef<MultinomialOpinion>,
        B: AsRef<MultinomialOpinion>,
    {
        let (a, b) = (a.as_ref(), b.as_ref());
        common_dimension("projected_distance", &[a, b])?;
        let diff = a.projection_array() - b.projection_array();
        Ok(diff.mapv(f64::abs).sum() / 2.0)
    }

    /// `(1 - u_a)(1 - u_b)`.
    pub fn conjunctive_certainty<A, B>(&self, a: &A, b: &B) -> Result<f64, OperatorError>
    where
        A: AsRef<MultinomialOpinion>,
        B: AsRef<MultinomialOpinion>,
    {
        let (a, b) = (a.as_ref(), b.as_ref());
        common_dimension("conjunctive_certainty", &[a, b])?;
        Ok((1.0 - a.uncertainty()) * (1.0 - b.uncertainty()))
    }

    /// Projected distance weighted by conjunctive certainty. Zero when
    /// either opinion is vacuous or both project identically.
    pub fn degree_of_conflict<A, B>(&self, a: &A, b: &B) -> Result<f64, OperatorError>
    where
        A: AsRef<MultinomialOpinion>,
        B: AsRef<MultinomialOpinion>,
    {
        let distance = self.projected_distance(a, b)?;
        let certainty = self.conjunctive_certainty(a, b)?;
        let conflict = distance * certainty;
        debug!(distance, certainty, conflict, "degree of conflict");
        Ok(conflict)
    }
}
