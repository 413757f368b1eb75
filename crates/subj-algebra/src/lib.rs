//! Subjective logic: an algebra over opinions.
//!
//! An opinion is a belief vector plus an uncertainty mass and a base rate
//! over a finite set of mutually exclusive states. Every opinion corresponds
//! to exactly one Dirichlet PDF, and the operators in [`operators`] have
//! closed-form counterparts in Dirichlet evidence combination.
//!
//! Dependency chain: DirichletPdf → Opinions → Operators. The
//! [`histogram`] module is an optional evidence source.

pub mod dirichlet;
pub mod histogram;
pub mod operators;
pub mod opinion;

pub use dirichlet::DirichletPdf;
pub use histogram::Histogram;
pub use operators::OpinionAlgebra;
pub use opinion::{BinomialOpinion, HyperOpinion, MultinomialOpinion, OpinionOwner};
