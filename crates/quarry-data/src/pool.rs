//! The labeled pool: train, validation, and test splits.

use quarry_core::types::{Example, Label};

/// Disjoint labeled splits. Validation and test are fixed at construction;
/// train only ever grows, through `append_train`.
#[derive(Debug, Clone)]
pub struct LabeledPool<F> {
    train: Vec<Example<F>>,
    validation: Vec<Example<F>>,
    test: Vec<Example<F>>,
}

impl<F> LabeledPool<F> {
    pub fn new(train: Vec<Example<F>>, validation: Vec<Example<F>>, test: Vec<Example<F>>) -> Self {
        Self {
            train,
            validation,
            test,
        }
    }

    pub fn train(&self) -> &[Example<F>] {
        &self.train
    }

    pub fn validation(&self) -> &[Example<F>] {
        &self.validation
    }

    pub fn test(&self) -> &[Example<F>] {
        &self.test
    }

    /// Append newly labeled examples to the train split and return its new
    /// size.
    pub fn append_train(&mut self, examples: Vec<Example<F>>) -> usize {
        self.train.extend(examples);
        self.train.len()
    }

    /// Number of train examples with `label`.
    pub fn train_count(&self, label: Label) -> usize {
        self.train.iter().filter(|e| e.label == label).count()
    }

    /// Transform the feature payload of every split at once, keeping order.
    pub fn try_map_splits<G, E>(
        self,
        mut f: impl FnMut(Vec<Example<F>>) -> Result<Vec<Example<G>>, E>,
    ) -> Result<LabeledPool<G>, E> {
        Ok(LabeledPool {
            train: f(self.train)?,
            validation: f(self.validation)?,
            test: f(self.test)?,
        })
    }
}
