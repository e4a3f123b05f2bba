//! Deterministic stratified partition of a corpus.

use quarry_core::config::SplitConfig;
use quarry_core::errors::DataError;
use quarry_core::types::{Example, Label};
use tracing::info;

use crate::pool::LabeledPool;
use crate::reservoir::UnlabeledReservoir;

/// Per-class split sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub validation: usize,
    pub test: usize,
    pub train: usize,
}

impl SplitSizes {
    pub fn per_class_required(&self) -> usize {
        self.validation + self.test + self.train
    }
}

impl From<&SplitConfig> for SplitSizes {
    fn from(config: &SplitConfig) -> Self {
        Self {
            validation: config.effective_val_split(),
            test: config.effective_test_split(),
            train: config.effective_train_split(),
        }
    }
}

/// Partition `examples` into a labeled pool and an unlabeled reservoir.
///
/// Per class, in corpus order: the first `validation` examples go to
/// validation, the next `test` to test, the next `train` to train, and the
/// rest to that class's reservoir queue. Each split lists negatives before
/// positives.
///
/// Fails with `InsufficientExamples` if either class has fewer than
/// `validation + test + train` examples.
pub fn partition<F>(
    examples: Vec<Example<F>>,
    sizes: SplitSizes,
) -> Result<(LabeledPool<F>, UnlabeledReservoir<F>), DataError> {
    let required = sizes.per_class_required();
    let (positives, negatives): (Vec<_>, Vec<_>) =
        examples.into_iter().partition(|e| e.label == Label::Positive);

    for (label, available) in [
        (Label::Negative, negatives.len()),
        (Label::Positive, positives.len()),
    ] {
        if available < required {
            return Err(DataError::InsufficientExamples {
                label,
                available,
                required,
            });
        }
    }

    let neg = ClassSplit::carve(negatives, sizes);
    let pos = ClassSplit::carve(positives, sizes);

    info!(
        validation = sizes.validation * 2,
        test = sizes.test * 2,
        train = sizes.train * 2,
        reservoir_positive = pos.rest.len(),
        reservoir_negative = neg.rest.len(),
        "partitioned corpus"
    );

    let pool = LabeledPool::new(
        concat(neg.train, pos.train),
        concat(neg.validation, pos.validation),
        concat(neg.test, pos.test),
    );
    let reservoir = UnlabeledReservoir::new(pos.rest, neg.rest);
    Ok((pool, reservoir))
}

struct ClassSplit<F> {
    validation: Vec<Example<F>>,
    test: Vec<Example<F>>,
    train: Vec<Example<F>>,
    rest: Vec<Example<F>>,
}

impl<F> ClassSplit<F> {
    fn carve(mut examples: Vec<Example<F>>, sizes: SplitSizes) -> Self {
        let mut rest = examples.split_off(sizes.validation);
        let validation = examples;
        let mut after_test = rest.split_off(sizes.test);
        let test = rest;
        let remainder = after_test.split_off(sizes.train);
        let train = after_test;
        Self {
            validation,
            test,
            train,
            rest: remainder,
        }
    }
}

fn concat<T>(mut a: Vec<T>, b: Vec<T>) -> Vec<T> {
    a.extend(b);
    a
}
