//! A scripted classifier whose error counts and validation losses are
//! fixed up front, so controller behavior can be asserted exactly.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quarry_core::errors::ModelError;
use quarry_core::events::{
    LoopEventHandler, ReservoirShortfallEvent, RoundStartedEvent, RunCompletedEvent,
    SamplesDrawnEvent,
};
use quarry_core::traits::Classifier;
use quarry_core::types::{
    BestSnapshot, EpochMetrics, Evaluation, Example, FitOutcome, FitParams, Label,
};
use quarry_data::{partition, LabeledPool, SplitSizes, UnlabeledReservoir};
use serde::{Deserialize, Serialize};

/// Identifies the parameters a scripted fit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedSnapshot {
    pub fit: usize,
    pub epoch: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fit { train_size: usize },
    ResetOptimizer,
    Restore(ScriptedSnapshot),
}

#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    /// Validation loss per epoch, one list per `fit` call.
    validation_losses: Vec<Vec<f64>>,
    /// `(false_negatives, false_positives)` reported for parameters from
    /// the given fit call.
    confusion: HashMap<usize, (usize, usize)>,
    live: Option<ScriptedSnapshot>,
    fits: usize,
    pub calls: Vec<Call>,
}

impl ScriptedClassifier {
    pub fn new(validation_losses: Vec<Vec<f64>>) -> Self {
        Self {
            validation_losses,
            ..Self::default()
        }
    }

    pub fn with_confusion(mut self, fit: usize, false_negatives: usize, false_positives: usize) -> Self {
        self.confusion.insert(fit, (false_negatives, false_positives));
        self
    }

    pub fn live(&self) -> Option<ScriptedSnapshot> {
        self.live
    }

    pub fn restores(&self) -> Vec<ScriptedSnapshot> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Restore(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Classifier for ScriptedClassifier {
    type Features = ();
    type Snapshot = ScriptedSnapshot;

    fn fit(
        &mut self,
        train: &[Example<()>],
        _validation: &[Example<()>],
        params: FitParams,
    ) -> Result<FitOutcome<ScriptedSnapshot>, ModelError> {
        self.calls.push(Call::Fit {
            train_size: train.len(),
        });
        let fit = self.fits;
        self.fits += 1;

        let losses = self
            .validation_losses
            .get(fit)
            .cloned()
            .unwrap_or_else(|| vec![1.0]);
        let losses: Vec<f64> = losses.into_iter().take(params.max_epochs).collect();

        let history: Vec<EpochMetrics> = losses
            .iter()
            .enumerate()
            .map(|(i, &validation_loss)| EpochMetrics {
                epoch: i + 1,
                loss: validation_loss,
                validation_loss,
                accuracy: 0.5,
                validation_accuracy: 0.5,
            })
            .collect();

        let mut best = BestSnapshot {
            epoch: 1,
            validation_loss: losses[0],
            snapshot: ScriptedSnapshot { fit, epoch: 1 },
        };
        for m in &history[1..] {
            if m.validation_loss < best.validation_loss {
                best = BestSnapshot {
                    epoch: m.epoch,
                    validation_loss: m.validation_loss,
                    snapshot: ScriptedSnapshot { fit, epoch: m.epoch },
                };
            }
        }

        self.live = Some(ScriptedSnapshot {
            fit,
            epoch: history.len(),
        });
        Ok(FitOutcome {
            best,
            history,
            stopped_early: false,
        })
    }

    fn predict(&self, examples: &[Example<()>]) -> Result<Vec<f64>, ModelError> {
        Ok(vec![0.5; examples.len()])
    }

    fn evaluate(&self, examples: &[Example<()>]) -> Result<Evaluation, ModelError> {
        let fit = self.live.map_or(0, |s| s.fit);
        let (false_negatives, false_positives) = self.confusion.get(&fit).copied().unwrap_or((1, 1));
        let positives = examples.iter().filter(|e| e.label == Label::Positive).count();
        let negatives = examples.len() - positives;
        let true_positives = positives.saturating_sub(false_negatives);
        let true_negatives = negatives.saturating_sub(false_positives);
        let total = true_positives + true_negatives + false_positives + false_negatives;
        Ok(Evaluation {
            accuracy: if total == 0 {
                0.0
            } else {
                (true_positives + true_negatives) as f64 / total as f64
            },
            loss: 0.0,
            true_positives,
            true_negatives,
            false_positives,
            false_negatives,
        })
    }

    fn reset_optimizer(&mut self) {
        self.calls.push(Call::ResetOptimizer);
    }

    fn snapshot(&self) -> ScriptedSnapshot {
        self.live.unwrap_or(ScriptedSnapshot { fit: 0, epoch: 0 })
    }

    fn restore(&mut self, snapshot: &ScriptedSnapshot) -> Result<(), ModelError> {
        self.calls.push(Call::Restore(*snapshot));
        self.live = Some(*snapshot);
        Ok(())
    }
}

/// `per_class` positives and negatives partitioned with the given sizes.
pub fn balanced_split(
    per_class: u64,
    sizes: SplitSizes,
) -> (LabeledPool<()>, UnlabeledReservoir<()>) {
    let examples = (0..per_class * 2)
        .map(|i| {
            let label = if i % 2 == 0 { Label::Positive } else { Label::Negative };
            Example::new(i, (), label)
        })
        .collect();
    partition(examples, sizes).unwrap()
}

/// 2 / 2 / 4 per class.
pub fn small_sizes() -> SplitSizes {
    SplitSizes {
        validation: 2,
        test: 2,
        train: 4,
    }
}

#[derive(Debug, Default)]
pub struct CountingHandler {
    pub rounds_started: AtomicUsize,
    pub draws: AtomicUsize,
    pub shortfalls: AtomicUsize,
    pub runs_completed: AtomicUsize,
}

impl CountingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl LoopEventHandler for CountingHandler {
    fn on_round_started(&self, _event: &RoundStartedEvent) {
        self.rounds_started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_samples_drawn(&self, _event: &SamplesDrawnEvent) {
        self.draws.fetch_add(1, Ordering::SeqCst);
    }

    fn on_reservoir_shortfall(&self, _event: &ReservoirShortfallEvent) {
        self.shortfalls.fetch_add(1, Ordering::SeqCst);
    }

    fn on_run_completed(&self, _event: &RunCompletedEvent) {
        self.runs_completed.fetch_add(1, Ordering::SeqCst);
    }
}
