//! # quarry-core
//!
//! Foundation crate for the Quarry active-learning workspace.
//! Defines the shared types, the classifier and snapshot-store contracts,
//! errors, configuration, loop events, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::QuarryConfig;
pub use errors::{ConfigError, DataError, LearningError, ModelError, StorageError};
pub use traits::{Classifier, SnapshotStore};
pub use types::{EpochMetrics, Evaluation, Example, ExampleId, FitOutcome, Label};
