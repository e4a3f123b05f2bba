//! Identifiers for examples.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of an example, assigned once in corpus order.
///
/// The controller tracks examples only by id and label; it never looks at
/// features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(pub u64);

impl ExampleId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ex-{}", self.0)
    }
}

impl From<u64> for ExampleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
