//! The sampling controller: the active-learning state machine.
//!
//! ```text
//! Init ──initialize──▶ Evaluate ──evaluate──▶ Sample ──sample──▶ Train
//!                         ▲                                         │
//!                         └───────────────retrain───────────────────┘
//! Evaluate | Sample ──finish──▶ Done
//! ```
//!
//! Parameters carry over between rounds: `retrain` resets only the
//! optimizer. The snapshot store is read back once, in `finish`, to
//! restore the best snapshot among the rounds this controller trained.

use std::fmt;
use std::time::Instant;

use chrono::Utc;
use quarry_core::config::QuarryConfig;
use quarry_core::errors::LearningError;
use quarry_core::events::{
    EvaluationCompletedEvent, EventDispatcher, FitCompletedEvent, ReservoirShortfallEvent,
    RoundStartedEvent, RunCompletedEvent, SamplesDrawnEvent, SnapshotSavedEvent,
};
use quarry_core::traits::{Classifier, SnapshotStore};
use quarry_core::types::{Evaluation, FitParams, Label, SnapshotRecord};
use quarry_data::{Draw, LabeledPool, UnlabeledReservoir};
use tracing::{debug, info, warn};

use crate::metrics::MetricsLog;
use crate::ratio::SamplingRatio;
use crate::report::{RoundSummary, RunReport, SamplingStep};

/// Where the controller is in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Train,
    Evaluate,
    Sample,
    Done,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Train => "train",
            Phase::Evaluate => "evaluate",
            Phase::Sample => "sample",
            Phase::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Evaluate → sample → retrain cycles after the initial fit.
    pub num_iterations: usize,
    /// Examples requested per sampling step, split by [`SamplingRatio`].
    pub sampling_size: usize,
    pub fit_params: FitParams,
}

impl ControllerSettings {
    pub fn from_config(config: &QuarryConfig) -> Self {
        Self {
            num_iterations: config.sampling.effective_num_iterations(),
            sampling_size: config.sampling.effective_sampling_size(),
            fit_params: config.training.fit_params(),
        }
    }
}

/// Outcome of an `evaluate` transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundEvaluation {
    /// Round of the model that was evaluated.
    pub round: usize,
    pub evaluation: Evaluation,
    pub ratio: SamplingRatio,
}

/// Drives a classifier through the active-learning loop.
pub struct SamplingController<C, St>
where
    C: Classifier,
    St: SnapshotStore<C::Snapshot>,
{
    classifier: C,
    store: St,
    pool: LabeledPool<C::Features>,
    reservoir: UnlabeledReservoir<C::Features>,
    settings: ControllerSettings,
    metrics: MetricsLog,
    events: EventDispatcher,
    phase: Phase,
    /// Completed retrain rounds; also the round index of the live model.
    round: usize,
    rounds: Vec<RoundSummary>,
}

impl<C, St> SamplingController<C, St>
where
    C: Classifier,
    St: SnapshotStore<C::Snapshot>,
{
    pub fn new(
        classifier: C,
        store: St,
        pool: LabeledPool<C::Features>,
        reservoir: UnlabeledReservoir<C::Features>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            classifier,
            store,
            pool,
            reservoir,
            settings,
            metrics: MetricsLog::new(),
            events: EventDispatcher::new(),
            phase: Phase::Init,
            round: 0,
            rounds: Vec::new(),
        }
    }

    /// Attach an event dispatcher.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the round that produced the live parameters.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn pool(&self) -> &LabeledPool<C::Features> {
        &self.pool
    }

    pub fn reservoir(&self) -> &UnlabeledReservoir<C::Features> {
        &self.reservoir
    }

    pub fn metrics(&self) -> &MetricsLog {
        &self.metrics
    }

    pub fn rounds(&self) -> &[RoundSummary] {
        &self.rounds
    }

    /// Sampling cycles left before `finish` is the only way forward.
    pub fn remaining_iterations(&self) -> usize {
        self.settings.num_iterations.saturating_sub(self.round)
    }

    pub fn into_classifier(self) -> C {
        self.classifier
    }

    /// Run the whole loop: initial fit, `num_iterations` cycles, then
    /// restore the best snapshot and evaluate it on the test split.
    pub fn run(&mut self) -> Result<RunReport, LearningError> {
        self.initialize()?;
        while self.remaining_iterations() > 0 {
            let evaluation = self.evaluate()?;
            self.sample(&evaluation)?;
            self.retrain()?;
        }
        self.finish()
    }

    /// Initial fit on the starting train split (round 0).
    pub fn initialize(&mut self) -> Result<(), LearningError> {
        self.expect_phase("initialize", &[Phase::Init])?;
        info!(
            train_size = self.pool.train().len(),
            validation_size = self.pool.validation().len(),
            test_size = self.pool.test().len(),
            reservoir_size = self.reservoir.len(),
            num_iterations = self.settings.num_iterations,
            "starting active-learning run"
        );
        self.fit_round(0)?;
        self.phase = Phase::Evaluate;
        Ok(())
    }

    /// Evaluate the live model on the test split and derive the sampling
    /// ratio. Without an intervening `sample` or `retrain`, repeated calls
    /// return identical results.
    pub fn evaluate(&mut self) -> Result<RoundEvaluation, LearningError> {
        self.expect_phase("evaluate", &[Phase::Evaluate, Phase::Sample])?;

        let evaluation = self.classifier.evaluate(self.pool.test())?;
        let ratio = SamplingRatio::from_evaluation(&evaluation);
        let round = self.round;

        if ratio.is_degenerate() {
            info!(
                round,
                false_positives = evaluation.false_positives,
                false_negatives = evaluation.false_negatives,
                "an error count is zero, falling back to an even split"
            );
        }
        info!(
            round,
            accuracy = evaluation.accuracy,
            false_positives = evaluation.false_positives,
            false_negatives = evaluation.false_negatives,
            ratio_positive = ratio.positive(),
            ratio_negative = ratio.negative(),
            "test evaluation"
        );
        self.events
            .emit_evaluation_completed(&EvaluationCompletedEvent {
                round,
                accuracy: evaluation.accuracy,
                false_positives: evaluation.false_positives,
                false_negatives: evaluation.false_negatives,
                ratio_positive: ratio.positive(),
                ratio_negative: ratio.negative(),
                degenerate: ratio.is_degenerate(),
            });

        self.phase = Phase::Sample;
        Ok(RoundEvaluation {
            round,
            evaluation,
            ratio,
        })
    }

    /// Move `floor(share * sampling_size)` examples per class from the
    /// reservoir into the train split, clamped to what remains.
    pub fn sample(&mut self, evaluation: &RoundEvaluation) -> Result<SamplingStep, LearningError> {
        self.expect_phase("sample", &[Phase::Sample])?;
        if self.remaining_iterations() == 0 {
            return Err(LearningError::InvalidTransition {
                action: "sample past the configured iterations",
                phase: self.phase.name(),
            });
        }

        let allocation = evaluation.ratio.allocation(self.settings.sampling_size);
        let negatives = self.reservoir.draw_up_to(Label::Negative, allocation.negative);
        let positives = self.reservoir.draw_up_to(Label::Positive, allocation.positive);
        self.report_draw(&negatives);
        self.report_draw(&positives);

        let step = SamplingStep {
            evaluation: evaluation.evaluation,
            ratio_positive: evaluation.ratio.positive(),
            ratio_negative: evaluation.ratio.negative(),
            degenerate: evaluation.ratio.is_degenerate(),
            requested_positive: positives.requested,
            drawn_positive: positives.drawn(),
            requested_negative: negatives.requested,
            drawn_negative: negatives.drawn(),
        };

        self.pool.append_train(negatives.examples);
        let train_size = self.pool.append_train(positives.examples);
        debug!(round = self.round, train_size, drawn = step.drawn(), "train split grown");

        if let Some(summary) = self.rounds.last_mut() {
            summary.sampling = Some(step.clone());
        }
        self.phase = Phase::Train;
        Ok(step)
    }

    /// Reset the optimizer and fit again on the grown train split. The
    /// live parameters from the previous round are the starting point.
    pub fn retrain(&mut self) -> Result<(), LearningError> {
        self.expect_phase("retrain", &[Phase::Train])?;
        self.classifier.reset_optimizer();
        let round = self.round + 1;
        self.fit_round(round)?;
        self.round = round;
        self.phase = Phase::Evaluate;
        Ok(())
    }

    /// Restore the best snapshot across rounds `0..=round` and evaluate it
    /// on the test split. Records a store holds for later rounds are never
    /// considered.
    pub fn finish(&mut self) -> Result<RunReport, LearningError> {
        self.expect_phase("finish", &[Phase::Evaluate, Phase::Sample])?;

        let best = self.store.load_best_through(self.round)?;
        self.classifier.restore(&best.snapshot)?;
        let final_evaluation = self.classifier.evaluate(self.pool.test())?;
        self.phase = Phase::Done;

        let report = RunReport {
            rounds: self.rounds.clone(),
            best_round: best.round,
            best_validation_loss: best.validation_loss,
            final_evaluation,
            final_train_size: self.pool.train().len(),
            reservoir_remaining_positive: self.reservoir.remaining(Label::Positive),
            reservoir_remaining_negative: self.reservoir.remaining(Label::Negative),
            completed_at: Utc::now(),
        };

        info!(
            rounds = report.rounds.len(),
            best_round = report.best_round,
            best_validation_loss = report.best_validation_loss,
            accuracy = final_evaluation.accuracy,
            "restored best snapshot"
        );
        self.events.emit_run_completed(&RunCompletedEvent {
            rounds: report.rounds.len(),
            best_round: report.best_round,
            best_validation_loss: report.best_validation_loss,
            final_accuracy: final_evaluation.accuracy,
        });
        Ok(report)
    }

    fn fit_round(&mut self, round: usize) -> Result<(), LearningError> {
        let train_size = self.pool.train().len();
        self.events
            .emit_round_started(&RoundStartedEvent { round, train_size });

        let started = Instant::now();
        let outcome = self.classifier.fit(
            self.pool.train(),
            self.pool.validation(),
            self.settings.fit_params,
        )?;
        self.metrics.extend_round(round, &outcome.history);

        if outcome.never_improved() {
            debug!(round, "validation loss never beat the first epoch");
        }

        let epochs_run = outcome.epochs_run();
        let stopped_early = outcome.stopped_early;
        let best = outcome.best;
        let record = SnapshotRecord::new(round, best.epoch, best.validation_loss, best.snapshot);
        self.store.save(&record)?;
        self.events.emit_snapshot_saved(&SnapshotSavedEvent {
            round,
            epoch: record.epoch,
            validation_loss: record.validation_loss,
        });

        info!(
            round,
            train_size,
            epochs_run,
            best_epoch = record.epoch,
            validation_loss = record.validation_loss,
            stopped_early,
            round_duration_ms = started.elapsed().as_millis() as u64,
            "round trained"
        );
        self.events.emit_fit_completed(&FitCompletedEvent {
            round,
            epochs_run,
            best_epoch: record.epoch,
            best_validation_loss: record.validation_loss,
            stopped_early,
        });

        self.rounds.push(RoundSummary {
            round,
            train_size,
            epochs_run,
            best_epoch: record.epoch,
            best_validation_loss: record.validation_loss,
            stopped_early,
            sampling: None,
        });
        Ok(())
    }

    fn report_draw(&self, draw: &Draw<C::Features>) {
        let remaining = self.reservoir.remaining(draw.label);
        if draw.shortfall() > 0 {
            warn!(
                round = self.round,
                label = %draw.label,
                requested = draw.requested,
                drawn = draw.drawn(),
                "reservoir exhausted, drew fewer examples than requested"
            );
            self.events
                .emit_reservoir_shortfall(&ReservoirShortfallEvent {
                    round: self.round,
                    label: draw.label,
                    requested: draw.requested,
                    drawn: draw.drawn(),
                });
        }
        self.events.emit_samples_drawn(&SamplesDrawnEvent {
            round: self.round,
            label: draw.label,
            requested: draw.requested,
            drawn: draw.drawn(),
            remaining,
        });
    }

    fn expect_phase(&self, action: &'static str, allowed: &[Phase]) -> Result<(), LearningError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(LearningError::InvalidTransition {
                action,
                phase: self.phase.name(),
            })
        }
    }
}

impl<C, St> fmt::Debug for SamplingController<C, St>
where
    C: Classifier,
    St: SnapshotStore<C::Snapshot>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplingController")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("settings", &self.settings)
            .field("train_size", &self.pool.train().len())
            .field("reservoir_size", &self.reservoir.len())
            .field("metrics", &self.metrics.len())
            .finish()
    }
}
