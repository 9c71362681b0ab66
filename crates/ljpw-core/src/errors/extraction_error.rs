//! Extraction errors.
//!
//! Unreadable text never produces one of these: it falls back to the
//! neutral profile. They only arise when a rule table fails to compile.

use super::error_code::{self, LjpwErrorCode};

/// Errors that can occur while building a heuristic extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Invalid pattern in rule {rule}: {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl LjpwErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACTION_ERROR
    }
}
