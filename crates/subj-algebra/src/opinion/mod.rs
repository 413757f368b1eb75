//! Opinion types.
//!
//! - [`MultinomialOpinion`]: the central value type over `n` states
//! - [`BinomialOpinion`]: a 2-state view with scalar accessors
//! - [`HyperOpinion`]: belief over composite states of a domain
//! - [`OpinionOwner`]: opaque metadata tag

pub mod binomial;
pub mod hyper;
pub mod multinomial;
pub mod owner;

pub use binomial::BinomialOpinion;
pub use hyper::HyperOpinion;
pub use multinomial::MultinomialOpinion;
pub use owner::OpinionOwner;

use std::fmt;

/// Writes `(v_1, v_2, ..., v_n)`.
pub(crate) fn write_tuple<'a>(
    f: &mut fmt::Formatter<'_>,
    values: impl IntoIterator<Item = &'a f64>,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, ")")
}
