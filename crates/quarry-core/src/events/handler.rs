//! LoopEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing the active-learning loop.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about.
pub trait LoopEventHandler: Send + Sync {
    fn on_round_started(&self, _event: &RoundStartedEvent) {}
    fn on_fit_completed(&self, _event: &FitCompletedEvent) {}
    fn on_evaluation_completed(&self, _event: &EvaluationCompletedEvent) {}
    fn on_samples_drawn(&self, _event: &SamplesDrawnEvent) {}
    fn on_reservoir_shortfall(&self, _event: &ReservoirShortfallEvent) {}
    fn on_snapshot_saved(&self, _event: &SnapshotSavedEvent) {}
    fn on_run_completed(&self, _event: &RunCompletedEvent) {}
}
