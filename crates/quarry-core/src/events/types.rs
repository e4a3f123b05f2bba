//! Event payload types for the loop events.

use crate::types::Label;

/// Payload for `on_round_started`. Round 0 is the initial fit.
#[derive(Debug, Clone)]
pub struct RoundStartedEvent {
    pub round: usize,
    pub train_size: usize,
}

/// Payload for `on_fit_completed`.
#[derive(Debug, Clone)]
pub struct FitCompletedEvent {
    pub round: usize,
    pub epochs_run: usize,
    pub best_epoch: usize,
    pub best_validation_loss: f64,
    pub stopped_early: bool,
}

/// Payload for `on_evaluation_completed`.
#[derive(Debug, Clone)]
pub struct EvaluationCompletedEvent {
    pub round: usize,
    pub accuracy: f64,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub ratio_positive: f64,
    pub ratio_negative: f64,
    /// True when the 0.5/0.5 fallback was used.
    pub degenerate: bool,
}

/// Payload for `on_samples_drawn`.
#[derive(Debug, Clone)]
pub struct SamplesDrawnEvent {
    pub round: usize,
    pub label: Label,
    pub requested: usize,
    pub drawn: usize,
    pub remaining: usize,
}

/// Payload for `on_reservoir_shortfall`.
#[derive(Debug, Clone)]
pub struct ReservoirShortfallEvent {
    pub round: usize,
    pub label: Label,
    pub requested: usize,
    pub drawn: usize,
}

/// Payload for `on_snapshot_saved`.
#[derive(Debug, Clone)]
pub struct SnapshotSavedEvent {
    pub round: usize,
    pub epoch: usize,
    pub validation_loss: f64,
}

/// Payload for `on_run_completed`.
#[derive(Debug, Clone)]
pub struct RunCompletedEvent {
    pub rounds: usize,
    pub best_round: usize,
    pub best_validation_loss: f64,
    pub final_accuracy: f64,
}
