//! Top-level LJPW configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CalibrationConfig, CompositionConfig, ExtractionConfig, OptimizerKind, ScanConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LJPW_*`)
/// 3. Project config (`ljpw.toml` in project root)
/// 4. User config (`~/.ljpw/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LjpwConfig {
    pub extraction: ExtractionConfig,
    pub composition: CompositionConfig,
    pub calibration: CalibrationConfig,
    pub scan: ScanConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_max_file_size: Option<u64>,
    pub scan_threads: Option<usize>,
    pub optimizer: Option<OptimizerKind>,
    pub max_iterations: Option<usize>,
    pub parameters_path: Option<String>,
}

impl LjpwConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &LjpwConfig) -> Result<(), ConfigError> {
        if let Some(bonus) = config.composition.harmony_bonus_per_feature {
            if !(0.0..=1.0).contains(&bonus) {
                return Err(validation_failed(
                    "composition.harmony_bonus_per_feature",
                    "must be between 0.0 and 1.0",
                ));
            }
        }
        if config.composition.harmony_threshold == Some(0) {
            return Err(validation_failed(
                "composition.harmony_threshold",
                "must be at least 1",
            ));
        }
        if config.calibration.max_iterations == Some(0) {
            return Err(validation_failed(
                "calibration.max_iterations",
                "must be greater than 0",
            ));
        }
        if let Some(tol) = config.calibration.gradient_tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(validation_failed(
                    "calibration.gradient_tolerance",
                    "must be a positive number",
                ));
            }
        }
        for (field, share) in [
            (
                "calibration.coupling_reduction",
                config.calibration.coupling_reduction,
            ),
            (
                "calibration.bonus_reduction",
                config.calibration.bonus_reduction,
            ),
        ] {
            if let Some(share) = share {
                if !(0.0..1.0).contains(&share) {
                    return Err(validation_failed(field, "must be in [0.0, 1.0)"));
                }
            }
        }
        config
            .calibration
            .effective_bounds()
            .map_err(|e| validation_failed("calibration.bounds", &e.to_string()))?;
        if config.scan.max_file_size == Some(0) {
            return Err(validation_failed(
                "scan.max_file_size",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.ljpw/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut LjpwConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: LjpwConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    pub fn merge(base: &mut LjpwConfig, other: &LjpwConfig) {
        // Extraction
        if !other.extraction.languages.is_empty() {
            base.extraction.languages = other.extraction.languages.clone();
        }
        if other.extraction.detect_flags.is_some() {
            base.extraction.detect_flags = other.extraction.detect_flags;
        }

        // Composition
        if other.composition.harmony_threshold.is_some() {
            base.composition.harmony_threshold = other.composition.harmony_threshold;
        }
        if other.composition.harmony_bonus_per_feature.is_some() {
            base.composition.harmony_bonus_per_feature =
                other.composition.harmony_bonus_per_feature;
        }
        if other.composition.parameters_path.is_some() {
            base.composition.parameters_path = other.composition.parameters_path.clone();
        }

        // Calibration
        if other.calibration.optimizer.is_some() {
            base.calibration.optimizer = other.calibration.optimizer;
        }
        if other.calibration.max_iterations.is_some() {
            base.calibration.max_iterations = other.calibration.max_iterations;
        }
        if other.calibration.gradient_tolerance.is_some() {
            base.calibration.gradient_tolerance = other.calibration.gradient_tolerance;
        }
        if other.calibration.coupling_reduction.is_some() {
            base.calibration.coupling_reduction = other.calibration.coupling_reduction;
        }
        if other.calibration.bonus_reduction.is_some() {
            base.calibration.bonus_reduction = other.calibration.bonus_reduction;
        }
        for (name, range) in &other.calibration.bounds {
            base.calibration.bounds.insert(name.clone(), *range);
        }

        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.include_hidden.is_some() {
            base.scan.include_hidden = other.scan.include_hidden;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LJPW_SCAN_MAX_FILE_SIZE`, `LJPW_CALIBRATION_OPTIMIZER`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut LjpwConfig) {
        if let Ok(val) = std::env::var("LJPW_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LJPW_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LJPW_EXTRACTION_LANGUAGES") {
            config.extraction.languages = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(val) = std::env::var("LJPW_COMPOSITION_HARMONY_THRESHOLD") {
            if let Ok(v) = val.parse::<usize>() {
                config.composition.harmony_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LJPW_COMPOSITION_PARAMETERS") {
            config.composition.parameters_path = Some(val);
        }
        if let Ok(val) = std::env::var("LJPW_CALIBRATION_OPTIMIZER") {
            if let Ok(v) = val.parse::<OptimizerKind>() {
                config.calibration.optimizer = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LJPW_CALIBRATION_MAX_ITERATIONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.calibration.max_iterations = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut LjpwConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.optimizer {
            config.calibration.optimizer = Some(v);
        }
        if let Some(v) = cli.max_iterations {
            config.calibration.max_iterations = Some(v);
        }
        if let Some(ref v) = cli.parameters_path {
            config.composition.parameters_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn validation_failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Returns the user-level config directory: `~/.ljpw/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".ljpw"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
