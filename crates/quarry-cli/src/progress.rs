//! Human-readable progress lines on stderr.

use quarry_core::events::{
    EvaluationCompletedEvent, FitCompletedEvent, LoopEventHandler, ReservoirShortfallEvent,
    RunCompletedEvent,
};

/// Prints one line per round, per evaluation, and at the end of the run.
#[derive(Debug, Default)]
pub struct ProgressPrinter;

impl LoopEventHandler for ProgressPrinter {
    fn on_fit_completed(&self, event: &FitCompletedEvent) {
        eprintln!(
            "round {}: {} epochs, best epoch {} (val loss {:.4}){}",
            event.round,
            event.epochs_run,
            event.best_epoch,
            event.best_validation_loss,
            if event.stopped_early { ", stopped early" } else { "" }
        );
    }

    fn on_evaluation_completed(&self, event: &EvaluationCompletedEvent) {
        eprintln!(
            "  test accuracy {:.4}, fp {}, fn {} -> sample {:.2} pos / {:.2} neg{}",
            event.accuracy,
            event.false_positives,
            event.false_negatives,
            event.ratio_positive,
            event.ratio_negative,
            if event.degenerate { " (even split)" } else { "" }
        );
    }

    fn on_reservoir_shortfall(&self, event: &ReservoirShortfallEvent) {
        eprintln!(
            "  reservoir short on {}: wanted {}, got {}",
            event.label, event.requested, event.drawn
        );
    }

    fn on_run_completed(&self, event: &RunCompletedEvent) {
        eprintln!(
            "done: best round {} (val loss {:.4}), final test accuracy {:.4}",
            event.best_round, event.best_validation_loss, event.final_accuracy
        );
    }
}
