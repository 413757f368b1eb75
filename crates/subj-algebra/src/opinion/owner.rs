//! Opinion owner tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque tag naming the source that holds an opinion.
///
/// Carried alongside an opinion and never interpreted by the algebra.
/// Operators do not propagate it to their results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpinionOwner(pub String);

impl OpinionOwner {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpinionOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OpinionOwner {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
