//! Snapshot storage errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised by snapshot stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("snapshot serialization failed: {message}")]
    Serialization { message: String },

    #[error("no snapshot stored for round {round}")]
    SnapshotNotFound { round: usize },

    #[error("snapshot store is empty")]
    EmptyStore,
}

impl QuarryErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SnapshotNotFound { .. } | Self::EmptyStore => error_code::SNAPSHOT_NOT_FOUND,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
