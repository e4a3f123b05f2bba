//! # quarry-storage
//!
//! Snapshot stores keyed by round index. The best snapshot across a run
//! is a reduction over what is stored, never an overwrite side effect.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
