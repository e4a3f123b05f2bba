//! Errors surfaced by the sampling controller.

use super::error_code::{self, QuarryErrorCode};
use super::{ConfigError, DataError, ModelError, StorageError};

/// Errors that can occur while running the active-learning loop.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot {action} while in phase {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
}

impl QuarryErrorCode for LearningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Data(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::InvalidTransition { .. } => error_code::INVALID_TRANSITION,
        }
    }
}
