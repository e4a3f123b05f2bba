//! Classifier errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised by a classifier implementation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("cannot fit without validation examples")]
    EmptyValidationSet,

    #[error("loss became non-finite in epoch {epoch}")]
    NonFiniteLoss { epoch: usize },

    #[error("invalid fit parameters: {reason}")]
    InvalidParams { reason: String },
}

impl QuarryErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
