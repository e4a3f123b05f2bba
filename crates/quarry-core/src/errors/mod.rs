//! Error handling for Quarry.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod learning_error;
pub mod model_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::QuarryErrorCode;
pub use learning_error::LearningError;
pub use model_error::ModelError;
pub use storage_error::StorageError;
