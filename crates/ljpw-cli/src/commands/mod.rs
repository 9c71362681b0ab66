//! Subcommand implementations.

pub mod calibrate;
pub mod diagnose;
pub mod predict;
pub mod scan;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use ljpw_core::config::CliOverrides;
use ljpw_core::errors::ConfigError;
use ljpw_core::{CouplingParameters, LjpwConfig, LjpwError};

/// Layered config rooted at `root`, with CLI flags on top.
pub(crate) fn load_config(root: &Path, overrides: CliOverrides) -> Result<LjpwConfig, LjpwError> {
    Ok(LjpwConfig::load(root, Some(&overrides))?)
}

/// Parameters from `composition.parameters_path`, or the theoretical
/// defaults when none is configured.
pub(crate) fn resolve_parameters(config: &LjpwConfig) -> Result<CouplingParameters, LjpwError> {
    match &config.composition.parameters_path {
        Some(path) => {
            let params = CouplingParameters::load(Path::new(path))?;
            tracing::debug!(path = %path, "loaded coupling parameters");
            Ok(params)
        }
        None => Ok(CouplingParameters::theoretical()),
    }
}

pub(crate) fn path_string(path: Option<PathBuf>) -> Option<String> {
    path.map(|p| p.display().to_string())
}

/// Read and deserialize a JSON input file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LjpwError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: display.clone(),
    })?;
    serde_json::from_str(&content).map_err(|e| {
        LjpwError::from(ConfigError::ParseError {
            path: display,
            message: e.to_string(),
        })
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), LjpwError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ConfigError::InvalidValue {
        field: "output".to_string(),
        message: e.to_string(),
    })?;
    println!("{text}");
    Ok(())
}

pub(crate) fn format_profile(values: [f64; 4]) -> String {
    format!(
        "L={:.3} J={:.3} P={:.3} W={:.3}",
        values[0], values[1], values[2], values[3]
    )
}
