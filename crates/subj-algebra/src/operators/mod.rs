//! Operators over multinomial opinions.
//!
//! Every operator is a pure function: it borrows its inputs and returns a
//! fresh opinion (or a scalar metric), never a partial result. Inputs are
//! accepted as anything implementing `AsRef<MultinomialOpinion>`, so
//! multinomial and binomial opinions mix freely.
//!
//! [`OpinionAlgebra`] carries the numeric tolerance. The free functions at
//! the bottom of this module use the default tolerance.

mod deduction;
mod discount;
mod fusion;
mod metrics;
mod multiplication;
mod unfusion;

use subj_core::config::NumericConfig;
use subj_core::constants::{DEFAULT_TOLERANCE, MIN_FUSION_OPINIONS};
use subj_core::errors::OperatorError;

use crate::opinion::MultinomialOpinion;

/// The operator suite, parameterised by a numeric tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpinionAlgebra {
    tolerance: f64,
}

impl Default for OpinionAlgebra {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl OpinionAlgebra {
    pub fn new(config: &NumericConfig) -> Self {
        Self {
            tolerance: config.effective_tolerance(),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// Rejects fusion inputs with fewer than two opinions.
fn require_fusion_inputs(operator: &'static str, given: usize) -> Result<(), OperatorError> {
    if given < MIN_FUSION_OPINIONS {
        return Err(OperatorError::InsufficientOpinions {
            operator,
            required: MIN_FUSION_OPINIONS,
            given,
        });
    }
    Ok(())
}

/// Returns the shared dimension of `opinions`, rejecting unset or unequal
/// dimensions.
fn common_dimension(operator: &'static str, opinions: &[&MultinomialOpinion]) -> Result<usize, OperatorError> {
    let Some(first) = opinions.first() else {
        return Err(OperatorError::InsufficientOpinions {
            operator,
            required: 1,
            given: 0,
        });
    };
    let expected = first.dim();
    if expected == 0 {
        return Err(OperatorError::degenerate(operator, "opinion dimension is unset"));
    }
    for opinion in &opinions[1..] {
        if opinion.dim() != expected {
            return Err(OperatorError::DimensionMismatch {
                operator,
                expected,
                actual: opinion.dim(),
            });
        }
    }
    Ok(expected)
}

/// Dimension of a single operand, rejecting an unset one.
fn operand_dimension(operator: &'static str, opinion: &MultinomialOpinion) -> Result<usize, OperatorError> {
    common_dimension(operator, &[opinion])
}

// ---- default-tolerance free functions ----

/// Half the L1 distance between two projections, in `[0, 1]`.
pub fn projected_distance<A, B>(a: &A, b: &B) -> Result<f64, OperatorError>
where
    A: AsRef<MultinomialOpinion>,
    B: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().projected_distance(a, b)
}

/// `(1 - u_a)(1 - u_b)`.
pub fn conjunctive_certainty<A, B>(a: &A, b: &B) -> Result<f64, OperatorError>
where
    A: AsRef<MultinomialOpinion>,
    B: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().conjunctive_certainty(a, b)
}

/// Projected distance times conjunctive certainty.
pub fn degree_of_conflict<A, B>(a: &A, b: &B) -> Result<f64, OperatorError>
where
    A: AsRef<MultinomialOpinion>,
    B: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().degree_of_conflict(a, b)
}

pub fn averaging_fusion<O: AsRef<MultinomialOpinion>>(opinions: &[O]) -> Result<MultinomialOpinion, OperatorError> {
    OpinionAlgebra::with_defaults().averaging_fusion(opinions)
}

pub fn cumulative_fusion<O: AsRef<MultinomialOpinion>>(opinions: &[O]) -> Result<MultinomialOpinion, OperatorError> {
    OpinionAlgebra::with_defaults().cumulative_fusion(opinions)
}

/// Cumulative fusion of exactly two opinions.
pub fn cumulative_fusion_pair<A, B>(a: &A, b: &B) -> Result<MultinomialOpinion, OperatorError>
where
    A: AsRef<MultinomialOpinion>,
    B: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().cumulative_fusion_pair(a, b)
}

pub fn cumulative_unfusion<F, O>(fused: &F, opinion: &O, base_rate: &[f64]) -> Result<MultinomialOpinion, OperatorError>
where
    F: AsRef<MultinomialOpinion>,
    O: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().cumulative_unfusion(fused, opinion, base_rate)
}

pub fn trust_discount<O: AsRef<MultinomialOpinion>>(opinion: &O, trust: f64) -> Result<MultinomialOpinion, OperatorError> {
    OpinionAlgebra::with_defaults().trust_discount(opinion, trust)
}

pub fn multiplication<A, B>(a: &A, b: &B) -> Result<MultinomialOpinion, OperatorError>
where
    A: AsRef<MultinomialOpinion>,
    B: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().multiplication(a, b)
}

pub fn deduction<O, C>(opinion: &O, conditionals: &[C]) -> Result<MultinomialOpinion, OperatorError>
where
    O: AsRef<MultinomialOpinion>,
    C: AsRef<MultinomialOpinion>,
{
    OpinionAlgebra::with_defaults().deduction(opinion, conditionals)
}

// ---- short aliases ----

pub use self::averaging_fusion as abf;
pub use self::conjunctive_certainty as cc;
pub use self::cumulative_fusion as cbf;
pub use self::cumulative_fusion_pair as cbf2;
pub use self::degree_of_conflict as doc;
pub use self::projected_distance as pd;
pub use self::trust_discount as td;
