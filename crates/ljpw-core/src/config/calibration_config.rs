//! Calibration configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_FALLBACK_BONUS_REDUCTION, DEFAULT_FALLBACK_COUPLING_REDUCTION,
    DEFAULT_GRADIENT_TOLERANCE, DEFAULT_MAX_ITERATIONS,
};
use crate::errors::{CalibrationError, ConfigError};
use crate::types::ParameterBounds;

/// Which optimizer backs the calibration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerKind {
    #[default]
    ProjectedGradient,
    /// No numerical optimizer: fixed-percentage reduction.
    Fallback,
}

impl OptimizerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::ProjectedGradient => "projected-gradient",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "projected-gradient" | "gradient" | "pg" => Ok(Self::ProjectedGradient),
            "fallback" | "none" => Ok(Self::Fallback),
            other => Err(ConfigError::InvalidValue {
                field: "calibration.optimizer".to_string(),
                message: format!("unknown optimizer '{other}'"),
            }),
        }
    }
}

/// Configuration for the calibration engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Optimizer backend. Default: projected-gradient.
    pub optimizer: Option<OptimizerKind>,
    /// Iteration cap for the projected-gradient optimizer. Default: 500.
    pub max_iterations: Option<usize>,
    /// Projected-gradient norm treated as converged. Default: 1e-7.
    pub gradient_tolerance: Option<f64>,
    /// Share removed from each coupling by the fallback. Default: 0.25.
    pub coupling_reduction: Option<f64>,
    /// Share removed from each bonus by the fallback. Default: 0.30.
    pub bonus_reduction: Option<f64>,
    /// Per-parameter `[low, high]` overrides of the reference bounds.
    pub bounds: BTreeMap<String, [f64; 2]>,
}

impl CalibrationConfig {
    pub fn effective_optimizer(&self) -> OptimizerKind {
        self.optimizer.unwrap_or_default()
    }

    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn effective_gradient_tolerance(&self) -> f64 {
        self.gradient_tolerance.unwrap_or(DEFAULT_GRADIENT_TOLERANCE)
    }

    pub fn effective_coupling_reduction(&self) -> f64 {
        self.coupling_reduction
            .unwrap_or(DEFAULT_FALLBACK_COUPLING_REDUCTION)
    }

    pub fn effective_bonus_reduction(&self) -> f64 {
        self.bonus_reduction.unwrap_or(DEFAULT_FALLBACK_BONUS_REDUCTION)
    }

    /// Reference bounds with every configured override applied.
    pub fn effective_bounds(&self) -> Result<ParameterBounds, CalibrationError> {
        self.bounds
            .iter()
            .try_fold(ParameterBounds::default(), |bounds, (name, [low, high])| {
                bounds.with_override(name, *low, *high)
            })
    }
}
