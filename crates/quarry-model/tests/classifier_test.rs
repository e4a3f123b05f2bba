//! Training behavior of the logistic regression classifier.

use quarry_core::config::TrainingConfig;
use quarry_core::errors::ModelError;
use quarry_core::traits::Classifier;
use quarry_core::types::{Example, FitParams, Label};
use quarry_data::TokenSequence;
use quarry_model::{LogisticRegression, LogisticRegressionConfig, ModelSnapshot};

const DIM: usize = 8;
const GOOD: u32 = 2;
const BAD: u32 = 3;
const FILLER: u32 = 4;

fn config() -> LogisticRegressionConfig {
    LogisticRegressionConfig {
        dimension: DIM,
        batch_size: 4,
        learning_rate: 0.5,
        momentum: 0.9,
        l2: 0.0,
        seed: 7,
    }
}

fn example(id: u64, tokens: &[u32], label: Label) -> Example<TokenSequence> {
    let mut ids = tokens.to_vec();
    ids.resize(6, 0);
    Example::new(id, TokenSequence(ids), label)
}

/// Positives mention GOOD, negatives mention BAD.
fn separable(n_per_class: u64, id_offset: u64) -> Vec<Example<TokenSequence>> {
    let mut out = Vec::new();
    for i in 0..n_per_class {
        out.push(example(id_offset + 2 * i, &[GOOD, FILLER], Label::Positive));
        out.push(example(id_offset + 2 * i + 1, &[BAD, FILLER], Label::Negative));
    }
    out
}

/// The opposite association: validation can only get worse as training
/// on `separable` data progresses.
fn contradicting(n_per_class: u64) -> Vec<Example<TokenSequence>> {
    let mut out = Vec::new();
    for i in 0..n_per_class {
        out.push(example(1000 + 2 * i, &[GOOD], Label::Negative));
        out.push(example(1001 + 2 * i, &[BAD], Label::Positive));
    }
    out
}

fn params(max_epochs: usize, patience: usize) -> FitParams {
    FitParams {
        max_epochs,
        patience,
    }
}

#[test]
fn learns_a_separable_problem() {
    let mut model = LogisticRegression::new(config());
    let train = separable(8, 0);
    let validation = separable(4, 100);

    let outcome = model.fit(&train, &validation, params(10, 3)).unwrap();
    let eval = model.evaluate(&validation).unwrap();

    assert_eq!(eval.accuracy, 1.0);
    assert_eq!(eval.false_positives + eval.false_negatives, 0);
    assert!(outcome.history.last().unwrap().validation_loss < outcome.history[0].validation_loss);
}

#[test]
fn best_snapshot_matches_lowest_validation_loss() {
    let mut model = LogisticRegression::new(config());
    let train = separable(8, 0);
    let validation = separable(4, 100);

    let outcome = model.fit(&train, &validation, params(6, 2)).unwrap();
    let lowest = outcome
        .history
        .iter()
        .map(|m| m.validation_loss)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(outcome.best.validation_loss, lowest);

    model.restore(&outcome.best.snapshot).unwrap();
    let eval = model.evaluate(&validation).unwrap();
    assert!((eval.loss - outcome.best.validation_loss).abs() < 1e-9);
}

#[test]
fn stops_after_patience_runs_out_and_keeps_last_epoch_live() {
    let mut model = LogisticRegression::new(config());
    let train = separable(8, 0);
    let validation = contradicting(4);

    let outcome = model.fit(&train, &validation, params(20, 2)).unwrap();

    assert_eq!(outcome.best.epoch, 1);
    assert_eq!(outcome.epochs_run(), 3);
    assert!(outcome.stopped_early);
    assert!(outcome.never_improved());
    // Live parameters are the last epoch's, not the best snapshot.
    assert_ne!(model.snapshot(), outcome.best.snapshot);
}

#[test]
fn running_to_the_epoch_cap_is_not_early_stopping() {
    let mut model = LogisticRegression::new(config());
    let outcome = model
        .fit(&separable(8, 0), &separable(4, 100), params(3, 10))
        .unwrap();
    assert_eq!(outcome.epochs_run(), 3);
    assert!(!outcome.stopped_early);
    assert_eq!(outcome.history[2].epoch, 3);
}

#[test]
fn reset_optimizer_keeps_parameters() {
    let mut model = LogisticRegression::new(config());
    model
        .fit(&separable(8, 0), &separable(4, 100), params(2, 2))
        .unwrap();
    assert!(!model.optimizer().is_fresh());

    let before = model.snapshot();
    model.reset_optimizer();
    assert!(model.optimizer().is_fresh());
    assert_eq!(model.snapshot(), before);
}

#[test]
fn training_is_deterministic_for_a_seed() {
    let train = separable(8, 0);
    let validation = separable(4, 100);

    let mut a = LogisticRegression::new(config());
    let mut b = LogisticRegression::new(config());
    let out_a = a.fit(&train, &validation, params(4, 4)).unwrap();
    let out_b = b.fit(&train, &validation, params(4, 4)).unwrap();

    assert_eq!(out_a.history, out_b.history);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn predictions_preserve_input_order() {
    let mut model = LogisticRegression::new(config());
    model
        .fit(&separable(8, 0), &separable(4, 100), params(5, 5))
        .unwrap();

    let probe = vec![
        example(1, &[GOOD], Label::Positive),
        example(2, &[BAD], Label::Negative),
        example(3, &[GOOD], Label::Positive),
    ];
    let p = model.predict(&probe).unwrap();
    assert_eq!(p.len(), 3);
    assert!(p[0] > 0.5 && p[2] > 0.5);
    assert!(p[1] < 0.5);
    assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn rejects_unusable_inputs() {
    let mut model = LogisticRegression::new(config());
    let data = separable(2, 0);

    assert!(matches!(
        model.fit(&[], &data, params(1, 1)),
        Err(ModelError::EmptyTrainingSet)
    ));
    assert!(matches!(
        model.fit(&data, &[], params(1, 1)),
        Err(ModelError::EmptyValidationSet)
    ));
    assert!(matches!(
        model.fit(&data, &data, params(0, 1)),
        Err(ModelError::InvalidParams { .. })
    ));
    assert!(matches!(
        model.predict(&[example(9, &[DIM as u32], Label::Positive)]),
        Err(ModelError::DimensionMismatch { .. })
    ));
}

#[test]
fn restore_rejects_foreign_dimensions() {
    let mut model = LogisticRegression::new(config());
    let foreign = ModelSnapshot {
        weights: vec![0.0; DIM + 1],
        bias: 0.0,
    };
    assert!(matches!(
        model.restore(&foreign),
        Err(ModelError::DimensionMismatch { expected: DIM, actual: 9 })
    ));
}

#[test]
fn config_follows_training_defaults() {
    let cfg = LogisticRegressionConfig::from_training(&TrainingConfig::default(), 10_000);
    assert_eq!(cfg.dimension, 10_000);
    assert_eq!(cfg.batch_size, 32);
    assert_eq!(cfg.seed, 42);
}
