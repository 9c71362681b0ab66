//! Composition: component profiles plus structural flags to a composite.

pub mod predictor;
pub mod topology;

pub use predictor::{CompositionBreakdown, CompositionPredictor, HarmonyRule};
pub use topology::{BonusTarget, BonusTopology};
