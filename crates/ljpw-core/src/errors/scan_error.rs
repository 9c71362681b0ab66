//! Scanner errors.

use super::error_code::{self, LjpwErrorCode};
use super::ExtractionError;

/// Errors that abort a scan. Per-file read failures are not errors;
/// they are recorded in the scan report and scored as neutral.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan root not found: {path}")]
    RootNotFound { path: String },

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Extractor setup failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl LjpwErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Extraction(e) => e.error_code(),
            _ => error_code::SCAN_ERROR,
        }
    }
}
