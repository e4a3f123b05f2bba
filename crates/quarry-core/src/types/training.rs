//! Training and evaluation results exchanged across the classifier boundary.

use serde::{Deserialize, Serialize};

use super::Label;
use crate::constants::{DECISION_THRESHOLD, PROBABILITY_EPSILON};

/// Stopping parameters for a single `fit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitParams {
    /// Hard cap on epochs for this call.
    pub max_epochs: usize,
    /// Consecutive non-improving epochs tolerated before stopping.
    pub patience: usize,
}

/// Metrics recorded at the end of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based epoch number within its `fit` call.
    pub epoch: usize,
    pub loss: f64,
    pub validation_loss: f64,
    pub accuracy: f64,
    pub validation_accuracy: f64,
}

/// The lowest-validation-loss parameter state seen during one `fit` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSnapshot<S> {
    pub epoch: usize,
    pub validation_loss: f64,
    pub snapshot: S,
}

/// Everything a `fit` call reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome<S> {
    pub best: BestSnapshot<S>,
    /// Per-epoch history of this call only.
    pub history: Vec<EpochMetrics>,
    /// True when patience ran out before `max_epochs`.
    pub stopped_early: bool,
}

impl<S> FitOutcome<S> {
    pub fn epochs_run(&self) -> usize {
        self.history.len()
    }

    /// True when no epoch after the first beat the first epoch's
    /// validation loss.
    pub fn never_improved(&self) -> bool {
        self.best.epoch == 1 && self.history.len() > 1
    }
}

/// Classification quality over a fixed example set at the 0.5 threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    /// Mean binary cross-entropy.
    pub loss: f64,
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl Evaluation {
    /// Build an evaluation from predicted probabilities and true labels.
    ///
    /// A probability strictly greater than 0.5 counts as a positive
    /// prediction. Extra entries in the longer slice are ignored.
    pub fn from_probabilities(probabilities: &[f64], labels: &[Label]) -> Self {
        let mut eval = Self {
            accuracy: 0.0,
            loss: 0.0,
            true_positives: 0,
            true_negatives: 0,
            false_positives: 0,
            false_negatives: 0,
        };
        let mut loss_sum = 0.0;
        for (&p, &label) in probabilities.iter().zip(labels) {
            let predicted_positive = p > DECISION_THRESHOLD;
            match (label, predicted_positive) {
                (Label::Positive, true) => eval.true_positives += 1,
                (Label::Negative, false) => eval.true_negatives += 1,
                (Label::Negative, true) => eval.false_positives += 1,
                (Label::Positive, false) => eval.false_negatives += 1,
            }
            loss_sum += binary_cross_entropy(p, label);
        }
        let total = eval.total();
        if total > 0 {
            eval.accuracy = (eval.true_positives + eval.true_negatives) as f64 / total as f64;
            eval.loss = loss_sum / total as f64;
        }
        eval
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    pub fn errors(&self) -> usize {
        self.false_positives + self.false_negatives
    }
}

/// Binary cross-entropy of one prediction, with the probability clamped
/// away from 0 and 1.
pub fn binary_cross_entropy(probability: f64, label: Label) -> f64 {
    let p = probability.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
    match label {
        Label::Positive => -p.ln(),
        Label::Negative => -(1.0 - p).ln(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strictly_greater_than_half() {
        let eval = Evaluation::from_probabilities(
            &[0.5, 0.51, 0.2, 0.9],
            &[Label::Positive, Label::Negative, Label::Negative, Label::Positive],
        );
        assert_eq!(eval.false_negatives, 1);
        assert_eq!(eval.false_positives, 1);
        assert_eq!(eval.true_negatives, 1);
        assert_eq!(eval.true_positives, 1);
        assert!((eval.accuracy - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_evaluation_is_zeroed() {
        let eval = Evaluation::from_probabilities(&[], &[]);
        assert_eq!(eval.total(), 0);
        assert_eq!(eval.accuracy, 0.0);
        assert_eq!(eval.loss, 0.0);
    }

    #[test]
    fn cross_entropy_is_finite_at_extremes() {
        assert!(binary_cross_entropy(0.0, Label::Positive).is_finite());
        assert!(binary_cross_entropy(1.0, Label::Negative).is_finite());
        assert!(binary_cross_entropy(0.9, Label::Positive) < binary_cross_entropy(0.1, Label::Positive));
    }
}
