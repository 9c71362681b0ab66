//! Configuration system for LJPW.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod calibration_config;
pub mod composition_config;
pub mod extraction_config;
pub mod ljpw_config;
pub mod scan_config;

pub use calibration_config::{CalibrationConfig, OptimizerKind};
pub use composition_config::CompositionConfig;
pub use extraction_config::ExtractionConfig;
pub use ljpw_config::{CliOverrides, LjpwConfig};
pub use scan_config::ScanConfig;
