//! LjpwErrorCode trait for stable, machine-readable error codes.

/// Trait for attaching a stable error code to every LJPW error.
/// Every error enum implements this so CLI and JSON consumers can
/// match on a code rather than on message text.
pub trait LjpwErrorCode {
    /// Returns the error code string (e.g., "CALIBRATION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted tagged string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const PROFILE_ERROR: &str = "PROFILE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CALIBRATION_ERROR: &str = "CALIBRATION_ERROR";
pub const EMPTY_TRAINING_SET: &str = "EMPTY_TRAINING_SET";
pub const INVALID_BOUNDS: &str = "INVALID_BOUNDS";
pub const EXTRACTION_ERROR: &str = "EXTRACTION_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
