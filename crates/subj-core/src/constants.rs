//! Shared constants for the opinion algebra.

/// Default prior weight of a free-standing Dirichlet PDF (the binomial
/// non-informative prior weight).
pub const DEFAULT_DIRICHLET_PRIOR_WEIGHT: f64 = 2.0;

/// Default tolerance used to detect vanishing denominators and vacuous or
/// dogmatic inputs.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Minimum number of opinions accepted by the fusion operators.
pub const MIN_FUSION_OPINIONS: usize = 2;

/// Default number of bins for evidence histograms.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Default tracing filter directive when `SUBJ_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "subj=info";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "SUBJ_LOG";

/// Largest domain cardinality a hyper-opinion may have. The reduced powerset
/// of the domain has `2^k - 2` elements and must stay addressable.
pub const MAX_HYPER_DOMAIN: usize = 20;
