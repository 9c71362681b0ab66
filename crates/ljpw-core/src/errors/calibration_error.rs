//! Calibration errors.

use super::error_code::{self, LjpwErrorCode};
use super::ProfileError;

/// Errors that can occur while fitting or evaluating coupling parameters.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("Calibration requires at least one training example")]
    EmptyTrainingSet,

    #[error("Invalid bounds for {parameter}: {reason}")]
    InvalidBounds { parameter: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Expected {expected} parameters, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid training data: {0}")]
    InvalidTrainingData(String),

    #[error("Invalid profile in training data: {0}")]
    Profile(#[from] ProfileError),
}

impl LjpwErrorCode for CalibrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTrainingSet => error_code::EMPTY_TRAINING_SET,
            Self::InvalidBounds { .. } => error_code::INVALID_BOUNDS,
            Self::Profile(e) => e.error_code(),
            _ => error_code::CALIBRATION_ERROR,
        }
    }
}
