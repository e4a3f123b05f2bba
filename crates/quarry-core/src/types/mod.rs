//! Shared value types passed between the data, model, storage, and
//! learning crates.

pub mod example;
pub mod identifiers;
pub mod label;
pub mod snapshot;
pub mod training;

pub use example::Example;
pub use identifiers::ExampleId;
pub use label::Label;
pub use snapshot::{SnapshotRecord, SnapshotSummary};
pub use training::{binary_cross_entropy, BestSnapshot, EpochMetrics, Evaluation, FitOutcome, FitParams};
