//! Tests for the loop event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quarry_core::events::*;
use quarry_core::types::Label;

#[derive(Default)]
struct CountingHandler {
    rounds: AtomicUsize,
    drawn: AtomicUsize,
    shortfalls: AtomicUsize,
}

impl LoopEventHandler for CountingHandler {
    fn on_round_started(&self, _event: &RoundStartedEvent) {
        self.rounds.fetch_add(1, Ordering::Relaxed);
    }

    fn on_samples_drawn(&self, event: &SamplesDrawnEvent) {
        self.drawn.fetch_add(event.drawn, Ordering::Relaxed);
    }

    fn on_reservoir_shortfall(&self, _event: &ReservoirShortfallEvent) {
        self.shortfalls.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl LoopEventHandler for PanickingHandler {
    fn on_round_started(&self, _event: &RoundStartedEvent) {
        panic!("handler failure");
    }
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_round_started(&RoundStartedEvent {
        round: 0,
        train_size: 8,
    });
}

#[test]
fn events_reach_registered_handlers() {
    let handler = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());

    dispatcher.emit_round_started(&RoundStartedEvent {
        round: 1,
        train_size: 16,
    });
    dispatcher.emit_samples_drawn(&SamplesDrawnEvent {
        round: 1,
        label: Label::Positive,
        requested: 4,
        drawn: 3,
        remaining: 0,
    });
    dispatcher.emit_reservoir_shortfall(&ReservoirShortfallEvent {
        round: 1,
        label: Label::Positive,
        requested: 4,
        drawn: 3,
    });

    assert_eq!(handler.rounds.load(Ordering::Relaxed), 1);
    assert_eq!(handler.drawn.load(Ordering::Relaxed), 3);
    assert_eq!(handler.shortfalls.load(Ordering::Relaxed), 1);
}

#[test]
fn panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_round_started(&RoundStartedEvent {
        round: 0,
        train_size: 8,
    });

    assert_eq!(counter.rounds.load(Ordering::Relaxed), 1);
}
