//! Cumulative unfusion: removes one contribution from a cumulative fusion.

use ndarray::Array1;
use subj_core::errors::OperatorError;
use tracing::{debug, instrument};

use super::{common_dimension, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// Recovers `x` from `fused = cumulative_fusion([x, opinion])`.
    ///
    /// With `D = u_op - u_fused + u_op * u_fused`:
    /// `b = (b_fused * u_op - b_op * u_fused) / D`, `u = u_op * u_fused / D`.
    /// The caller supplies the base rate of the recovered opinion.
    #[instrument(skip_all)]
    pub fn cumulative_unfusion<F, O>(
        &self,
        fused: &F,
        opinion: &O,
        base_rate: &[f64],
    ) -> Result<MultinomialOpinion, OperatorError>
    where
        F: AsRef<MultinomialOpinion>,
        O: AsRef<MultinomialOpinion>,
    {
        const OP: &str = "cumulative_unfusion";
        let (fused, opinion) = (fused.as_ref(), opinion.as_ref());
        let dim = common_dimension(OP, &[fused, opinion])?;
        if base_rate.len() != dim {
            return Err(OperatorError::DimensionMismatch {
                operator: OP,
                expected: dim,
                actual: base_rate.len(),
            });
        }

        let u_fused = fused.uncertainty();
        let u_op = opinion.uncertainty();
        let denominator = u_op - u_fused + u_op * u_fused;
        debug!(u_fused, u_op, denominator, "unfusing");
        if denominator.abs() <= self.tolerance {
            return Err(OperatorError::degenerate(
                OP,
                "u_op - u_fused + u_op * u_fused vanishes",
            ));
        }

        let belief = (fused.belief_array() * u_op - opinion.belief_array() * u_fused) / denominator;
        let uncertainty = u_op * u_fused / denominator;
        Ok(MultinomialOpinion::from_parts(
            belief,
            uncertainty,
            Array1::from(base_rate.to_vec()),
        ))
    }
}
