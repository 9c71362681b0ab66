//! Profile construction errors.

use super::error_code::{self, LjpwErrorCode};

/// Errors raised when a profile is built from malformed input.
///
/// Out-of-range numbers are never an error (they are clamped); these
/// variants cover input that is not a number at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Axis {axis} is not a number")]
    NonNumericAxis { axis: char },

    #[error("Axis {axis} is missing")]
    MissingAxis { axis: char },

    #[error("Unknown axis: {0}")]
    UnknownAxis(String),
}

impl LjpwErrorCode for ProfileError {
    fn error_code(&self) -> &'static str {
        error_code::PROFILE_ERROR
    }
}
