//! Trust discounting.

use subj_core::errors::OperatorError;
use tracing::{debug, warn};

use super::{operand_dimension, OpinionAlgebra};
use crate::opinion::MultinomialOpinion;

impl OpinionAlgebra {
    /// Scales belief by the projected trust `p` in the opinion's source and
    /// moves the removed mass to uncertainty: `b' = p b`,
    /// `u' = 1 - p sum(b)`. The base rate is unchanged.
    ///
    /// `p` outside `[0, 1]` is applied as given and logged.
    pub fn trust_discount<O: AsRef<MultinomialOpinion>>(
        &self,
        opinion: &O,
        trust: f64,
    ) -> Result<MultinomialOpinion, OperatorError> {
        let opinion = opinion.as_ref();
        operand_dimension("trust_discount", opinion)?;
        if !(0.0..=1.0).contains(&trust) {
            warn!(trust, "trust probability outside [0, 1]");
        }
        debug!(trust, "discounting");

        let belief = opinion.belief_array() * trust;
        let uncertainty = 1.0 - trust * opinion.belief_array().sum();
        Ok(MultinomialOpinion::from_parts(
            belief,
            uncertainty,
            opinion.base_rate_array().clone(),
        ))
    }
}
