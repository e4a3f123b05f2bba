//! Data loading, partitioning, and reservoir errors.

use super::error_code::{self, QuarryErrorCode};
use crate::types::Label;

/// Errors raised while loading, vectorizing, or partitioning a corpus.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The requested split sizes exceed what one class can supply.
    /// Fatal at setup.
    #[error("not enough {label} examples: {available} available, {required} required by the split")]
    InsufficientExamples {
        label: Label,
        available: usize,
        required: usize,
    },

    /// A raw draw asked for more examples than remain. The sampling
    /// controller clamps before drawing, so this never escapes the loop.
    #[error("reservoir underflow for {label}: requested {requested}, {available} available")]
    ReservoirUnderflow {
        label: Label,
        requested: usize,
        available: usize,
    },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed record at {path}:{line}: {message}")]
    MalformedRecord {
        path: String,
        line: usize,
        message: String,
    },

    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("vectorizer used before its vocabulary was fitted")]
    VocabularyNotFitted,
}

impl QuarryErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientExamples { .. } => error_code::INSUFFICIENT_EXAMPLES,
            Self::ReservoirUnderflow { .. } => error_code::RESERVOIR_UNDERFLOW,
            _ => error_code::DATA_ERROR,
        }
    }
}
