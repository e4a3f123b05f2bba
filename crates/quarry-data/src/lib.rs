//! # quarry-data
//!
//! Data side of the active-learning loop: corpus loading → text
//! standardization and vectorization → stratified partition into a
//! labeled pool plus an unlabeled reservoir.
//!
//! The pool's train split and the reservoir queues are the only mutable
//! data; both are changed exclusively by the sampling controller.

pub mod corpus;
pub mod pool;
pub mod reservoir;
pub mod split;
pub mod text;

pub use corpus::{Corpus, Document};
pub use pool::LabeledPool;
pub use reservoir::{Draw, UnlabeledReservoir};
pub use split::{partition, SplitSizes};
pub use text::{TextVectorizer, TokenSequence, Vocabulary};
