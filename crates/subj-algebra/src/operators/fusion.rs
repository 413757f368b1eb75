//! Averaging and cumulative belief fusion.
//!
//! Both operators weight each input by `u_t_i / u_a`, where `u_a` is the
//! product of all uncertainties and `u_t_i = u_a / u_i`. That ratio is
//! `1 / u_i`, so the weights are computed directly and the product of many
//! small uncertainties never underflows.

use ndarray::Array1;
use subj_core::errors::OperatorError;
use tracing::{debug, instrument};

use super::{common_dimension, require_fusion_inputs, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// Averaging belief fusion of two or more opinions.
    ///
    /// `b = sum(b_i / u_i) / sum(1 / u_i)`, `u = N / sum(1 / u_i)`.
    /// Dogmatic inputs (`u_i == 0`) are averaged among themselves.
    #[instrument(skip_all, fields(count = opinions.len()))]
    pub fn averaging_fusion<O: AsRef<MultinomialOpinion>>(&self, opinions: &[O]) -> Result<MultinomialOpinion, OperatorError> {
        const OP: &str = "averaging_fusion";
        let opinions: Vec<&MultinomialOpinion> = opinions.iter().map(AsRef::as_ref).collect();
        require_fusion_inputs(OP, opinions.len())?;
        let dim = common_dimension(OP, &opinions)?;

        if let Some(fused) = self.fuse_dogmatic(&opinions, dim) {
            return Ok(fused);
        }

        let weights = inverse_uncertainties(&opinions);
        let weight_sum: f64 = weights.iter().sum();
        let belief = weighted_belief_sum(&opinions, &weights, dim) / weight_sum;
        let uncertainty = opinions.len() as f64 / weight_sum;
        let base_rate = self.fused_base_rate(&opinions, &weights, dim);
        Ok(MultinomialOpinion::from_parts(belief, uncertainty, base_rate))
    }

    /// Cumulative belief fusion of two or more opinions.
    ///
    /// `b = sum(b_i / u_i) / D`, `u = 1 / D` with
    /// `D = sum(1 / u_i) - (N - 1)`. If every input is vacuous the first
    /// input is returned unchanged.
    #[instrument(skip_all, fields(count = opinions.len()))]
    pub fn cumulative_fusion<O: AsRef<MultinomialOpinion>>(&self, opinions: &[O]) -> Result<MultinomialOpinion, OperatorError> {
        const OP: &str = "cumulative_fusion";
        let opinions: Vec<&MultinomialOpinion> = opinions.iter().map(AsRef::as_ref).collect();
        require_fusion_inputs(OP, opinions.len())?;
        let dim = common_dimension(OP, &opinions)?;

        if opinions.iter().all(|o| o.is_vacuous(self.tolerance)) {
            debug!("all inputs vacuous, returning the first");
            return Ok(opinions[0].clone());
        }
        if let Some(fused) = self.fuse_dogmatic(&opinions, dim) {
            return Ok(fused);
        }

        let weights = inverse_uncertainties(&opinions);
        let denominator = weights.iter().sum::<f64>() - (opinions.len() as f64 - 1.0);
        let belief = weighted_belief_sum(&opinions, &weights, dim) / denominator;
        let uncertainty = 1.0 / denominator;
        let base_rate = self.fused_base_rate(&opinions, &weights, dim);
        Ok(MultinomialOpinion::from_parts(belief, uncertainty, base_rate))
    }

    pub fn cumulative_fusion_pair<A, B>(&self, a: &A, b: &B) -> Result<MultinomialOpinion, OperatorError>
    where
        A: AsRef<MultinomialOpinion>,
        B: AsRef<MultinomialOpinion>,
    {
        self.cumulative_fusion(&[a.as_ref(), b.as_ref()])
    }

    /// Equal-weight average of the dogmatic inputs, if there are any.
    fn fuse_dogmatic(&self, opinions: &[&MultinomialOpinion], dim: usize) -> Option<MultinomialOpinion> {
        let dogmatic: Vec<&MultinomialOpinion> = opinions
            .iter()
            .copied()
            .filter(|o| o.is_dogmatic(self.tolerance))
            .collect();
        if dogmatic.is_empty() {
            return None;
        }
        debug!(dogmatic = dogmatic.len(), "averaging dogmatic inputs");
        let count = dogmatic.len() as f64;
        let mut belief = Array1::<f64>::zeros(dim);
        let mut base_rate = Array1::<f64>::zeros(dim);
        for opinion in &dogmatic {
            belief += opinion.belief_array();
            base_rate += opinion.base_rate_array();
        }
        Some(MultinomialOpinion::from_parts(belief / count, 0.0, base_rate / count))
    }

    /// `sum(a_i (w_i - 1)) / sum(w_i - 1)`, the base-rate mixture weighted
    /// by each input's certainty. Falls back to the plain mean when every
    /// input is vacuous.
    fn fused_base_rate(&self, opinions: &[&MultinomialOpinion], weights: &[f64], dim: usize) -> Array1<f64> {
        let mut numerator = Array1::<f64>::zeros(dim);
        let mut denominator = 0.0;
        for (opinion, &w) in opinions.iter().zip(weights) {
            numerator.scaled_add(w - 1.0, opinion.base_rate_array());
            denominator += w - 1.0;
        }
        if denominator > self.tolerance {
            return numerator / denominator;
        }
        debug!("certainty weights vanish, averaging base rates");
        let mut mean = Array1::<f64>::zeros(dim);
        for opinion in opinions {
            mean += opinion.base_rate_array();
        }
        mean / opinions.len() as f64
    }
}

fn inverse_uncertainties(opinions: &[&MultinomialOpinion]) -> Vec<f64> {
    opinions.iter().map(|o| 1.0 / o.uncertainty()).collect()
}

fn weighted_belief_sum(opinions: &[&MultinomialOpinion], weights: &[f64], dim: usize) -> Array1<f64> {
    let mut sum = Array1::<f64>::zeros(dim);
    for (opinion, &w) in opinions.iter().zip(weights) {
        sum.scaled_add(w, opinion.belief_array());
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opinion::BinomialOpinion;
    use approx::assert_relative_eq;

    fn algebra() -> OpinionAlgebra {
        OpinionAlgebra::with_defaults()
    }

    #[test]
    fn cumulative_binomial_pair() {
        let a = BinomialOpinion::new(0.6, 0.2, 0.2, 0.5);
        let b = BinomialOpinion::new(0.3, 0.3, 0.4, 0.5);
        let fused = algebra().cumulative_fusion(&[a, b]).unwrap();
        let belief = fused.belief();
        assert_relative_eq!(belief[0], 0.3 / 0.52, epsilon = 1e-9);
        assert_relative_eq!(belief[1], 0.14 / 0.52, epsilon = 1e-9);
        assert_relative_eq!(fused.uncertainty(), 0.08 / 0.52, epsilon = 1e-9);
        assert_relative_eq!(fused.base_rate()[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn averaging_binomial_pair() {
        let a = BinomialOpinion::new(0.6, 0.2, 0.2, 0.5);
        let b = BinomialOpinion::new(0.3, 0.3, 0.4, 0.5);
        let fused = algebra().averaging_fusion(&[a, b]).unwrap();
        let belief = fused.belief();
        assert_relative_eq!(belief[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(belief[1], 0.14 / 0.6, epsilon = 1e-9);
        assert_relative_eq!(fused.uncertainty(), 0.16 / 0.6, epsilon = 1e-9);
    }

    #[test]
    fn all_vacuous_averaging_stays_vacuous() {
        let a = MultinomialOpinion::new(&[0.0, 0.0], 1.0, &[0.2, 0.8]).unwrap();
        let b = MultinomialOpinion::new(&[0.0, 0.0], 1.0, &[0.6, 0.4]).unwrap();
        let fused = algebra().averaging_fusion(&[&a, &b]).unwrap();
        assert_eq!(fused.uncertainty(), 1.0);
        assert_relative_eq!(fused.base_rate()[0], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn dogmatic_inputs_dominate() {
        let dogmatic = MultinomialOpinion::new(&[1.0, 0.0], 0.0, &[0.5, 0.5]).unwrap();
        let other = MultinomialOpinion::new(&[0.0, 0.5], 0.5, &[0.5, 0.5]).unwrap();
        for fused in [
            algebra().cumulative_fusion(&[&dogmatic, &other]).unwrap(),
            algebra().averaging_fusion(&[&dogmatic, &other]).unwrap(),
        ] {
            assert_eq!(fused.belief(), vec![1.0, 0.0]);
            assert_eq!(fused.uncertainty(), 0.0);
        }
    }

    #[test]
    fn single_input_rejected() {
        let a = MultinomialOpinion::vacuous(2).unwrap();
        assert_eq!(
            algebra().cumulative_fusion(&[a]),
            Err(OperatorError::InsufficientOpinions {
                operator: "cumulative_fusion",
                required: 2,
                given: 1
            })
        );
    }

    #[test]
    fn many_small_uncertainties_do_not_underflow() {
        let op = MultinomialOpinion::new(&[0.9, 0.099], 0.001, &[0.5, 0.5]).unwrap();
        let inputs = vec![op; 200];
        let fused = algebra().averaging_fusion(&inputs).unwrap();
        assert!(fused.belief().iter().all(|b| b.is_finite()));
        assert_relative_eq!(fused.uncertainty(), 0.001, epsilon = 1e-9);
    }
}
