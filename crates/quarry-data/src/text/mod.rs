//! Text standardization and vectorization.
//!
//! Vectorization is the only parallel stage of the pipeline. It runs on
//! `rayon` and always returns results in input order, so callers see a
//! plain blocking transform.

pub mod standardize;
pub mod vectorizer;
pub mod vocabulary;

pub use standardize::{standardize, tokenize};
pub use vectorizer::{TextVectorizer, TokenSequence};
pub use vocabulary::Vocabulary;
