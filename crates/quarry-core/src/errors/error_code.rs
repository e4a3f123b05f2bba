//! QuarryErrorCode trait for stable, machine-readable error codes.

/// Trait for mapping Quarry errors to stable error code strings.
/// Every error enum implements this so the CLI can print
/// `[ERROR_CODE] message` and scripts can match on the code.
pub trait QuarryErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INSUFFICIENT_EXAMPLES: &str = "INSUFFICIENT_EXAMPLES";
pub const RESERVOIR_UNDERFLOW: &str = "RESERVOIR_UNDERFLOW";
pub const DATA_ERROR: &str = "DATA_ERROR";
pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const SNAPSHOT_NOT_FOUND: &str = "SNAPSHOT_NOT_FOUND";
pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
