//! Corpus split configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-class sizes of the validation, test, and initial train splits.
/// Everything left over goes to the unlabeled reservoir.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    /// Validation examples per class. Default: 2500.
    pub val_split: Option<usize>,
    /// Test examples per class. Default: 2500.
    pub test_split: Option<usize>,
    /// Initial train examples per class. Default: 2500.
    pub train_split: Option<usize>,
    /// Shuffle each class with this seed before partitioning.
    /// Unset keeps corpus order.
    pub shuffle_seed: Option<u64>,
}

impl SplitConfig {
    pub fn effective_val_split(&self) -> usize {
        self.val_split.unwrap_or(defaults::DEFAULT_VAL_SPLIT)
    }

    pub fn effective_test_split(&self) -> usize {
        self.test_split.unwrap_or(defaults::DEFAULT_TEST_SPLIT)
    }

    pub fn effective_train_split(&self) -> usize {
        self.train_split.unwrap_or(defaults::DEFAULT_TRAIN_SPLIT)
    }

    /// Examples each class must supply before the reservoir gets any.
    pub fn per_class_required(&self) -> usize {
        self.effective_val_split() + self.effective_test_split() + self.effective_train_split()
    }
}
