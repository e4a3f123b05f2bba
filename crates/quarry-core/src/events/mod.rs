//! Loop events: observer hooks fired by the sampling controller.
//! Handlers observe only; nothing they do feeds back into the loop.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::LoopEventHandler;
pub use types::*;
