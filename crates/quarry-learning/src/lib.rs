//! # quarry-learning
//!
//! The active-learning loop. [`SamplingController`] drives a
//! [`Classifier`](quarry_core::Classifier) through an initial fit and a
//! fixed number of evaluate → sample → retrain cycles, growing the train
//! split from the unlabeled reservoir according to [`SamplingRatio`].

pub mod controller;
pub mod metrics;
pub mod ratio;
pub mod report;

pub use controller::{ControllerSettings, Phase, RoundEvaluation, SamplingController};
pub use metrics::{CsvFileSink, EpochRecord, JsonFileSink, MetricsLog, MetricsSink};
pub use ratio::{Allocation, SamplingRatio};
pub use report::{RoundSummary, RunReport, SamplingStep};
