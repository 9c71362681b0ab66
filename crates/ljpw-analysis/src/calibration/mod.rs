//! Calibration: fit the twelve coupling parameters to labeled examples.
//!
//! The objective is the mean squared Euclidean distance between predicted
//! and observed profiles. The optimizer is a capability chosen at
//! construction; the engine guarantees its result is never worse than the
//! starting point.

pub mod engine;
pub mod fallback;
pub mod objective;
pub mod optimizer;
pub mod projected_gradient;
pub mod training;

pub use engine::{
    CalibrationEngine, CalibrationOutcome, ExampleReport, HoldoutFold, HoldoutReport,
};
pub use fallback::FallbackReduction;
pub use objective::Objective;
pub use optimizer::{create_optimizer, CalibrationStatus, Optimizer, OptimizerRun};
pub use projected_gradient::ProjectedGradient;
pub use training::{load_training_set, parse_training_set, reference_training_set, TrainingExample};
