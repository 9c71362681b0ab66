//! The optimizer capability.

use serde::{Deserialize, Serialize};
use std::fmt;

use ljpw_core::config::{CalibrationConfig, OptimizerKind};
use ljpw_core::types::{CouplingParameters, ParameterBounds};

use super::{FallbackReduction, Objective, ProjectedGradient};

/// How an optimizer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    Converged,
    IterationLimit,
    /// No numerical optimizer ran; parameters come from the fixed reduction.
    Fallback,
}

impl CalibrationStatus {
    /// Status line for reports.
    pub fn message(self) -> &'static str {
        match self {
            Self::Converged => "calibration converged",
            Self::IterationLimit => "optimizer stopped at iteration limit",
            Self::Fallback => "no optimizer available, used approximate fallback",
        }
    }
}

impl fmt::Display for CalibrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one optimizer run, before the engine's never-worse check.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerRun {
    pub params: CouplingParameters,
    pub status: CalibrationStatus,
    pub iterations: usize,
}

/// Minimizes an [`Objective`] inside a bounds box.
pub trait Optimizer: Send + Sync {
    fn name(&self) -> &'static str;

    fn optimize(
        &self,
        objective: &Objective<'_>,
        start: &CouplingParameters,
        bounds: &ParameterBounds,
    ) -> OptimizerRun;
}

/// Build the optimizer named by the configuration.
pub fn create_optimizer(config: &CalibrationConfig) -> Box<dyn Optimizer> {
    match config.effective_optimizer() {
        OptimizerKind::ProjectedGradient => Box::new(ProjectedGradient::new(
            config.effective_max_iterations(),
            config.effective_gradient_tolerance(),
        )),
        OptimizerKind::Fallback => Box::new(FallbackReduction::new(
            config.effective_coupling_reduction(),
            config.effective_bonus_reduction(),
        )),
    }
}
