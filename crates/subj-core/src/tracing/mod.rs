//! Observability for the opinion algebra.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{env_filter, init_tracing, init_tracing_from_config, init_tracing_with_default};
