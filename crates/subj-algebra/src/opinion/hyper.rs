//! Hyper-opinion: belief over composite states.
//!
//! For a domain of `k` singleton states the belief vector covers the
//! reduced powerset, every non-empty proper subset of the domain. Element
//! `i` of the belief vector is the subset whose bitmask is `i + 1`, so the
//! vector has `2^k - 2` entries and bit `j` marks singleton `j`.

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use subj_core::constants::MAX_HYPER_DOMAIN;
use subj_core::errors::OpinionError;

use super::multinomial::MultinomialOpinion;
use super::owner::OpinionOwner;
use super::write_tuple;

/// Belief over the reduced powerset of a `k`-state domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHyperOpinion")]
pub struct HyperOpinion {
    domain_size: usize,
    belief: Array1<f64>,
    uncertainty: f64,
    base_rate: Array1<f64>,
    owner: Option<OpinionOwner>,
}

#[derive(Deserialize)]
struct RawHyperOpinion {
    domain_size: usize,
    belief: Array1<f64>,
    uncertainty: f64,
    base_rate: Array1<f64>,
    #[serde(default)]
    owner: Option<OpinionOwner>,
}

impl TryFrom<RawHyperOpinion> for HyperOpinion {
    type Error = OpinionError;

    fn try_from(raw: RawHyperOpinion) -> Result<Self, Self::Error> {
        if raw.domain_size != raw.base_rate.len() {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper base rate",
                expected: raw.domain_size,
                actual: raw.base_rate.len(),
            });
        }
        let expected = Self::reduced_powerset_size(raw.domain_size)?;
        if raw.belief.len() != expected {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper belief",
                expected,
                actual: raw.belief.len(),
            });
        }
        Ok(Self {
            domain_size: raw.domain_size,
            belief: raw.belief,
            uncertainty: raw.uncertainty,
            base_rate: raw.base_rate,
            owner: raw.owner,
        })
    }
}

impl HyperOpinion {
    /// `base_rate` is over the `k` singletons; `belief` has `2^k - 2`
    /// entries indexed by subset bitmask minus one.
    pub fn new(belief: &[f64], uncertainty: f64, base_rate: &[f64]) -> Result<Self, OpinionError> {
        let k = base_rate.len();
        let expected = Self::reduced_powerset_size(k)?;
        if belief.len() != expected {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper belief",
                expected,
                actual: belief.len(),
            });
        }
        let mut opinion = Self {
            domain_size: k,
            belief: Array1::from(belief.to_vec()),
            uncertainty: 1.0,
            base_rate: Array1::from(base_rate.to_vec()),
            owner: None,
        };
        opinion.update_uncertainty(uncertainty);
        Ok(opinion)
    }

    /// Vacuous hyper-opinion with a uniform singleton base rate.
    pub fn vacuous(domain_size: usize) -> Result<Self, OpinionError> {
        let size = Self::reduced_powerset_size(domain_size)?;
        Ok(Self {
            domain_size,
            belief: Array1::zeros(size),
            uncertainty: 1.0,
            base_rate: Array1::from_elem(domain_size, 1.0 / domain_size as f64),
            owner: None,
        })
    }

    /// `2^k - 2`. A domain needs at least two states to have composite
    /// subsets.
    pub fn reduced_powerset_size(domain_size: usize) -> Result<usize, OpinionError> {
        if domain_size == 0 {
            return Err(OpinionError::EmptyDimension);
        }
        if domain_size < 2 {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper domain",
                expected: 2,
                actual: domain_size,
            });
        }
        if domain_size > MAX_HYPER_DOMAIN {
            return Err(OpinionError::DimensionOverflow {
                dimension: domain_size,
            });
        }
        Ok((1usize << domain_size) - 2)
    }

    pub fn with_owner(mut self, owner: impl Into<OpinionOwner>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn belief(&self) -> Vec<f64> {
        self.belief.to_vec()
    }

    pub fn belief_array(&self) -> &Array1<f64> {
        &self.belief
    }

    /// Belief mass on the subset with the given bitmask.
    pub fn belief_of(&self, mask: usize) -> Option<f64> {
        mask.checked_sub(1).and_then(|i| self.belief.get(i).copied())
    }

    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn base_rate(&self) -> Vec<f64> {
        self.base_rate.to_vec()
    }

    pub fn owner(&self) -> Option<&OpinionOwner> {
        self.owner.as_ref()
    }

    /// `2^k - 2`.
    pub fn prior_weight(&self) -> f64 {
        self.belief.len() as f64
    }

    pub fn update_belief(&mut self, belief: &[f64]) -> Result<(), OpinionError> {
        if belief.len() != self.belief.len() {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper belief",
                expected: self.belief.len(),
                actual: belief.len(),
            });
        }
        self.belief = Array1::from(belief.to_vec());
        self.uncertainty = 1.0 - self.belief.sum();
        Ok(())
    }

    /// Same correction rule as [`MultinomialOpinion::update_uncertainty`].
    pub fn update_uncertainty(&mut self, uncertainty: f64) {
        let belief_sum = self.belief.sum();
        self.uncertainty = if belief_sum + uncertainty == 1.0 {
            uncertainty
        } else {
            1.0 - belief_sum
        };
    }

    pub fn update_base_rate(&mut self, base_rate: &[f64]) -> Result<(), OpinionError> {
        if base_rate.len() != self.domain_size {
            return Err(OpinionError::DimensionMismatch {
                context: "hyper base rate",
                expected: self.domain_size,
                actual: base_rate.len(),
            });
        }
        self.base_rate = Array1::from(base_rate.to_vec());
        Ok(())
    }

    /// Belief of each singleton after splitting every composite mass over
    /// its members in proportion to their base rates.
    fn singleton_belief(&self) -> Array1<f64> {
        let k = self.domain_size;
        let mut singles = Array1::<f64>::zeros(k);
        for (index, &mass) in self.belief.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            let mask = index + 1;
            let members: Vec<usize> = (0..k).filter(|j| mask & (1 << j) != 0).collect();
            let rate_sum: f64 = members.iter().map(|&j| self.base_rate[j]).sum();
            for &j in &members {
                let share = if rate_sum > 0.0 {
                    self.base_rate[j] / rate_sum
                } else {
                    1.0 / members.len() as f64
                };
                singles[j] += mass * share;
            }
        }
        singles
    }

    /// Projected probability over the singletons.
    pub fn projection(&self) -> Vec<f64> {
        (self.singleton_belief() + &(&self.base_rate * self.uncertainty)).to_vec()
    }

    /// Multinomial opinion with the same projection and uncertainty.
    pub fn to_multinomial(&self) -> MultinomialOpinion {
        MultinomialOpinion::from_parts(self.singleton_belief(), self.uncertainty, self.base_rate.clone())
    }
}

impl fmt::Display for HyperOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(B=")?;
        write_tuple(f, self.belief.iter())?;
        write!(f, ", u={}, a=", self.uncertainty)?;
        write_tuple(f, self.base_rate.iter())?;
        write!(f, ")")
    }
}
