//! Composition configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HARMONY_BONUS_PER_FEATURE, DEFAULT_HARMONY_THRESHOLD};

/// Configuration for the composition predictor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompositionConfig {
    /// Minimum number of true flags before the harmony bonus applies. Default: 3.
    pub harmony_threshold: Option<usize>,
    /// Bonus per flag beyond `harmony_threshold - 1`. Default: 0.05.
    pub harmony_bonus_per_feature: Option<f64>,
    /// Parameters file (`.toml` or `.json`) to predict with instead of the
    /// theoretical defaults.
    pub parameters_path: Option<String>,
}

impl CompositionConfig {
    /// Returns the effective harmony threshold, defaulting to 3.
    pub fn effective_harmony_threshold(&self) -> usize {
        self.harmony_threshold.unwrap_or(DEFAULT_HARMONY_THRESHOLD)
    }

    /// Returns the effective per-feature harmony bonus, defaulting to 0.05.
    pub fn effective_harmony_bonus_per_feature(&self) -> f64 {
        self.harmony_bonus_per_feature
            .unwrap_or(DEFAULT_HARMONY_BONUS_PER_FEATURE)
    }
}
