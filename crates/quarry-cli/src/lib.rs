//! # quarry-cli
//!
//! Wires the workspace together: corpus → partition → vectorizer →
//! logistic regression → sampling controller. The `quarry` binary is a
//! thin clap front end over [`run_experiment`].

pub mod pipeline;
pub mod progress;

pub use pipeline::{run_experiment, CorpusFormat, ExperimentOutcome};
pub use progress::ProgressPrinter;
