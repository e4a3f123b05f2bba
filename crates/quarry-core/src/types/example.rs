//! A labeled example with an opaque feature payload.

use serde::{Deserialize, Serialize};

use super::{ExampleId, Label};

/// One example: an opaque feature representation plus its binary label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example<F> {
    pub id: ExampleId,
    pub features: F,
    pub label: Label,
}

impl<F> Example<F> {
    pub fn new(id: impl Into<ExampleId>, features: F, label: Label) -> Self {
        Self {
            id: id.into(),
            features,
            label,
        }
    }

    /// Replace the feature payload, keeping identity and label.
    pub fn map_features<G>(self, f: impl FnOnce(F) -> G) -> Example<G> {
        Example {
            id: self.id,
            features: f(self.features),
            label: self.label,
        }
    }
}
