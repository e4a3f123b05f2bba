//! Contracts at the seams of the active-learning loop.

pub mod classifier;
pub mod snapshot_store;

pub use classifier::Classifier;
pub use snapshot_store::SnapshotStore;
