//! # ljpw-analysis
//!
//! Analysis engine for the LJPW composition model: heuristic text
//! extraction, the composition predictor, the calibration engine, derived
//! metrics, and a parallel file-system scanner.

pub mod calibration;
pub mod composition;
pub mod extraction;
pub mod metrics;
pub mod scanner;

pub use calibration::{CalibrationEngine, CalibrationOutcome, CalibrationStatus, TrainingExample};
pub use composition::{BonusTopology, CompositionPredictor, HarmonyRule};
pub use extraction::{ExtractorRegistry, HeuristicExtractor, Language, TextFeatureExtractor};
pub use metrics::{Diagnostic, Entity, SystemSummary};
pub use scanner::{scan, ScanReport, Scanner};
