//! Shared constants for the LJPW composition model.

/// LJPW version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Axis value given to every dimension when source text cannot be scored.
pub const NEUTRAL_AXIS_VALUE: f64 = 0.3;

/// Floor applied to distances and volumes before dividing by them.
pub const DISTANCE_EPSILON: f64 = 0.01;

/// Minimum number of present structural flags before the harmony bonus applies.
pub const DEFAULT_HARMONY_THRESHOLD: usize = 3;

/// Harmony bonus added per structural flag beyond `threshold - 1`.
pub const DEFAULT_HARMONY_BONUS_PER_FEATURE: f64 = 0.05;

/// Default share by which the fallback calibrator reduces coupling coefficients.
pub const DEFAULT_FALLBACK_COUPLING_REDUCTION: f64 = 0.25;

/// Default share by which the fallback calibrator reduces structural bonuses.
pub const DEFAULT_FALLBACK_BONUS_REDUCTION: f64 = 0.30;

/// Default iteration cap for the projected-gradient optimizer.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Default projected-gradient norm below which the optimizer reports convergence.
pub const DEFAULT_GRADIENT_TOLERANCE: f64 = 1e-7;

/// Default maximum file size in bytes for scanning (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Default number of scanner threads (0 = auto-detect).
pub const DEFAULT_THREADS: usize = 0;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "ljpw.toml";
