//! Top-level error aggregating every subsystem error.

use super::error_code::LjpwErrorCode;
use super::{CalibrationError, ConfigError, ExtractionError, ProfileError, ScanError};

/// Errors surfaced across crate boundaries.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LjpwError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

impl LjpwError {
    /// Returns true for errors caused by bad caller input (as opposed to
    /// environment failures). The CLI maps these to exit code 2.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::Profile(_) => true,
            Self::Config(ConfigError::WriteFailed { .. }) => false,
            Self::Config(_) => true,
            Self::Calibration(_) => true,
            Self::Extraction(_) => false,
            Self::Scan(ScanError::RootNotFound { .. }) => true,
            Self::Scan(_) => false,
        }
    }
}

impl LjpwErrorCode for LjpwError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Profile(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Calibration(e) => e.error_code(),
            Self::Extraction(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
        }
    }
}
