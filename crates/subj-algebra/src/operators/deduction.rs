//! Multinomial deduction.
//!
//! Given an opinion about `X` and one conditional opinion about `Y` per
//! state of `X`, derives an opinion about `Y`.

use ndarray::Array1;
use subj_core::errors::OperatorError;
use tracing::{debug, instrument};

use super::{common_dimension, operand_dimension, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// Deduces an opinion about `Y` from `opinion` about `X` and the
    /// conditionals `Y | x_i`, one per state of `X`.
    ///
    /// The result's base rate is the marginal base rate
    /// `a_y = sum(a_x_i b_i) / (1 - sum(a_x_i u_i))`; every conditional is
    /// re-based to it before projecting.
    #[instrument(skip_all, fields(conditionals = conditionals.len()))]
    pub fn deduction<O, C>(&self, opinion: &O, conditionals: &[C]) -> Result<MultinomialOpinion, OperatorError>
    where
        O: AsRef<MultinomialOpinion>,
        C: AsRef<MultinomialOpinion>,
    {
        const OP: &str = "deduction";
        let opinion = opinion.as_ref();
        let conditionals: Vec<&MultinomialOpinion> = conditionals.iter().map(AsRef::as_ref).collect();
        let x_dim = operand_dimension(OP, opinion)?;
        if conditionals.is_empty() {
            return Err(OperatorError::InsufficientOpinions {
                operator: OP,
                required: x_dim,
                given: 0,
            });
        }
        if conditionals.len() != x_dim {
            return Err(OperatorError::DimensionMismatch {
                operator: OP,
                expected: x_dim,
                actual: conditionals.len(),
            });
        }
        let y_dim = common_dimension(OP, &conditionals)?;

        let a_x = opinion.base_rate_array();
        let b_x = opinion.belief_array();
        let u_x = opinion.uncertainty();
        let p_x = opinion.projection_array();

        let a_y = self.marginal_base_rate(a_x, &conditionals, y_dim);
        let rebased: Vec<MultinomialOpinion> = conditionals.iter().map(|c| c.rebased(&a_y)).collect();
        let projections: Vec<Array1<f64>> = rebased.iter().map(MultinomialOpinion::projection_array).collect();

        // Projection of the conditionals under a vacuous antecedent, and the
        // smallest belief each Y state receives from any conditional.
        let mut p_vacuous = Array1::<f64>::zeros(y_dim);
        for (&weight, p) in a_x.iter().zip(&projections) {
            p_vacuous.scaled_add(weight, p);
        }
        let mut b_min = Array1::from_elem(y_dim, f64::INFINITY);
        for c in &conditionals {
            b_min.zip_mut_with(c.belief_array(), |m, &b| *m = m.min(b));
        }

        let u_vacuous = p_vacuous
            .iter()
            .zip(b_min.iter())
            .zip(a_y.iter())
            .filter(|(_, &a)| a > self.tolerance)
            .map(|((&p, &b), &a)| (p - b) / a)
            .fold(f64::INFINITY, f64::min);
        if !u_vacuous.is_finite() {
            return Err(OperatorError::degenerate(OP, "marginal base rate vanishes on every state"));
        }

        let uncertainty = u_x * u_vacuous
            + conditionals
                .iter()
                .zip(b_x.iter())
                .map(|(c, &b)| c.uncertainty() * b)
                .sum::<f64>();

        let mut projection = Array1::<f64>::zeros(y_dim);
        for (&weight, p) in p_x.iter().zip(&projections) {
            projection.scaled_add(weight, p);
        }
        debug!(u_vacuous, uncertainty, "deduced");

        let belief = &projection - &(&a_y * uncertainty);
        Ok(MultinomialOpinion::from_parts(belief, uncertainty, a_y))
    }

    /// Marginal base rate of `Y`. When every conditional with positive
    /// antecedent base rate is vacuous the denominator vanishes and the
    /// conditionals' own base rates are mixed instead.
    fn marginal_base_rate(
        &self,
        a_x: &Array1<f64>,
        conditionals: &[&MultinomialOpinion],
        y_dim: usize,
    ) -> Array1<f64> {
        let mut weighted_belief = Array1::<f64>::zeros(y_dim);
        let mut weighted_uncertainty = 0.0;
        for (&weight, c) in a_x.iter().zip(conditionals) {
            weighted_belief.scaled_add(weight, c.belief_array());
            weighted_uncertainty += weight * c.uncertainty();
        }
        let denominator = 1.0 - weighted_uncertainty;
        if denominator > self.tolerance {
            return weighted_belief / denominator;
        }
        debug!("conditionals vacuous, mixing their base rates");
        let mut mixed = Array1::<f64>::zeros(y_dim);
        for (&weight, c) in a_x.iter().zip(conditionals) {
            mixed.scaled_add(weight, c.base_rate_array());
        }
        mixed
    }
}
