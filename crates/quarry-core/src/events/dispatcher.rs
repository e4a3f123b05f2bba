//! Synchronous event dispatch, free when no handlers are registered.

use std::sync::Arc;

use super::handler::LoopEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn LoopEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn LoopEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn LoopEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("loop event handler panicked; continuing");
            }
        }
    }

    pub fn emit_round_started(&self, event: &RoundStartedEvent) {
        self.emit(|h| h.on_round_started(event));
    }

    pub fn emit_fit_completed(&self, event: &FitCompletedEvent) {
        self.emit(|h| h.on_fit_completed(event));
    }

    pub fn emit_evaluation_completed(&self, event: &EvaluationCompletedEvent) {
        self.emit(|h| h.on_evaluation_completed(event));
    }

    pub fn emit_samples_drawn(&self, event: &SamplesDrawnEvent) {
        self.emit(|h| h.on_samples_drawn(event));
    }

    pub fn emit_reservoir_shortfall(&self, event: &ReservoirShortfallEvent) {
        self.emit(|h| h.on_reservoir_shortfall(event));
    }

    pub fn emit_snapshot_saved(&self, event: &SnapshotSavedEvent) {
        self.emit(|h| h.on_snapshot_saved(event));
    }

    pub fn emit_run_completed(&self, event: &RunCompletedEvent) {
        self.emit(|h| h.on_run_completed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
