//! Normal multiplication: joint opinion over the Cartesian product of two
//! state spaces.

use ndarray::{Array1, Array2, Zip};
use subj_core::errors::OperatorError;
use tracing::{debug, instrument};

use super::{operand_dimension, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// Multiplies an `n`-state and an `m`-state opinion into an
    /// `n * m`-state opinion. State `(i, j)` is flattened to index
    /// `i * m + j`.
    ///
    /// The joint projection is the outer product of the two projections.
    /// Uncertainty is the largest value that keeps every joint belief at or
    /// above the product of the singleton beliefs:
    /// `u = min((p_ij - b_i b_j) / (a_i a_j))` over cells with positive
    /// base rate.
    #[instrument(skip_all)]
    pub fn multiplication<A, B>(&self, a: &A, b: &B) -> Result<MultinomialOpinion, OperatorError>
    where
        A: AsRef<MultinomialOpinion>,
        B: AsRef<MultinomialOpinion>,
    {
        const OP: &str = "multiplication";
        let (a, b) = (a.as_ref(), b.as_ref());
        let n = operand_dimension(OP, a)?;
        let m = operand_dimension(OP, b)?;

        let p_a = a.projection_array();
        let p_b = b.projection_array();
        let projection = outer(&p_a, &p_b);
        let singles = outer(a.belief_array(), b.belief_array());
        let base_rate = outer(a.base_rate_array(), b.base_rate_array());

        let mut uncertainty = f64::INFINITY;
        Zip::from(&projection)
            .and(&singles)
            .and(&base_rate)
            .for_each(|&p, &s, &r| {
                if r > self.tolerance {
                    uncertainty = uncertainty.min((p - s) / r);
                }
            });
        if !uncertainty.is_finite() {
            return Err(OperatorError::degenerate(OP, "joint base rate vanishes on every state"));
        }
        debug!(n, m, uncertainty, "multiplied");

        let belief = &projection - &(&base_rate * uncertainty);
        Ok(MultinomialOpinion::from_parts(
            flatten(&belief),
            uncertainty,
            flatten(&base_rate),
        ))
    }
}

fn outer(x: &Array1<f64>, y: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((x.len(), y.len()), |(i, j)| x[i] * y[j])
}

/// Row-major flattening.
fn flatten(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.iter().copied().collect()
}
