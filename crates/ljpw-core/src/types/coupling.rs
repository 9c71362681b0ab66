//! Coupling parameters of the composition model and their bounds table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::StructuralFeature;
use crate::errors::{CalibrationError, ConfigError};

/// Number of tunable parameters: four couplings plus eight bonuses.
pub const PARAMETER_COUNT: usize = 12;

/// Parameter names in vector order.
pub const PARAMETER_NAMES: [&str; PARAMETER_COUNT] = [
    "kappa_lj",
    "kappa_lp",
    "kappa_jl",
    "kappa_wl",
    "bonus_docstring",
    "bonus_type_hints",
    "bonus_error_handling",
    "bonus_logging",
    "bonus_testing",
    "bonus_state",
    "bonus_history",
    "bonus_validation",
];

/// Index of the first bonus inside the parameter vector.
const BONUS_OFFSET: usize = 4;

/// The twelve constants of the composition model.
///
/// Serialized as a flat mapping of named parameters. Every name is
/// required and unknown names are rejected, so a typo in a parameters
/// file cannot silently fall back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CouplingParameters {
    pub kappa_lj: f64,
    pub kappa_lp: f64,
    pub kappa_jl: f64,
    pub kappa_wl: f64,
    pub bonus_docstring: f64,
    pub bonus_type_hints: f64,
    pub bonus_error_handling: f64,
    pub bonus_logging: f64,
    pub bonus_testing: f64,
    pub bonus_state: f64,
    pub bonus_history: f64,
    pub bonus_validation: f64,
}

impl CouplingParameters {
    /// The uncalibrated starting point.
    pub fn theoretical() -> Self {
        Self::from_vector(&[
            1.2, 1.3, 1.2, 1.1, 0.10, 0.05, 0.08, 0.12, 0.15, 0.15, 0.20, 0.10,
        ])
    }

    /// Pack into the fixed 12-element order.
    pub fn to_vector(&self) -> [f64; PARAMETER_COUNT] {
        [
            self.kappa_lj,
            self.kappa_lp,
            self.kappa_jl,
            self.kappa_wl,
            self.bonus_docstring,
            self.bonus_type_hints,
            self.bonus_error_handling,
            self.bonus_logging,
            self.bonus_testing,
            self.bonus_state,
            self.bonus_history,
            self.bonus_validation,
        ]
    }

    pub fn from_vector(v: &[f64; PARAMETER_COUNT]) -> Self {
        Self {
            kappa_lj: v[0],
            kappa_lp: v[1],
            kappa_jl: v[2],
            kappa_wl: v[3],
            bonus_docstring: v[4],
            bonus_type_hints: v[5],
            bonus_error_handling: v[6],
            bonus_logging: v[7],
            bonus_testing: v[8],
            bonus_state: v[9],
            bonus_history: v[10],
            bonus_validation: v[11],
        }
    }

    /// Unpack from a slice, rejecting the wrong length.
    pub fn from_slice(v: &[f64]) -> Result<Self, CalibrationError> {
        let arr: [f64; PARAMETER_COUNT] =
            v.try_into()
                .map_err(|_| CalibrationError::DimensionMismatch {
                    expected: PARAMETER_COUNT,
                    found: v.len(),
                })?;
        Ok(Self::from_vector(&arr))
    }

    /// Bonus magnitude for a structural feature.
    pub fn bonus(&self, feature: StructuralFeature) -> f64 {
        self.to_vector()[BONUS_OFFSET + feature.index()]
    }

    /// Parameter value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        parameter_index(name).map(|i| self.to_vector()[i])
    }

    /// The four coupling coefficients in vector order.
    pub fn couplings(&self) -> [f64; 4] {
        [self.kappa_lj, self.kappa_lp, self.kappa_jl, self.kappa_wl]
    }

    pub fn is_finite(&self) -> bool {
        self.to_vector().iter().all(|v| v.is_finite())
    }

    /// Reject NaN and infinite values, naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match PARAMETER_NAMES
            .iter()
            .zip(self.to_vector())
            .find(|(_, v)| !v.is_finite())
        {
            Some((name, value)) => Err(ConfigError::InvalidValue {
                field: (*name).to_string(),
                message: format!("{value} is not a finite number"),
            }),
            None => Ok(()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "parameters".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "parameters".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a `.toml` or `.json` file (decided by extension; anything
    /// other than `.json` is read as TOML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: display.clone(),
        })?;
        let parsed = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };
        let params: Self = parsed.map_err(|message| ConfigError::ParseError {
            path: display,
            message,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Persist to a `.toml` or `.json` file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = if is_json(path) {
            self.to_json_string()?
        } else {
            self.to_toml_string()?
        };
        std::fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for CouplingParameters {
    fn default() -> Self {
        Self::theoretical()
    }
}

impl fmt::Display for CouplingParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in PARAMETER_NAMES.iter().zip(self.to_vector()) {
            writeln!(f, "{name:<22} {value:.4}")?;
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Vector index of a named parameter.
pub fn parameter_index(name: &str) -> Option<usize> {
    PARAMETER_NAMES.iter().position(|n| *n == name.trim())
}

/// Per-parameter `[low, high]` box used by calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBounds {
    ranges: [(f64, f64); PARAMETER_COUNT],
}

impl ParameterBounds {
    /// Build from exactly twelve ranges in vector order.
    pub fn new(ranges: &[(f64, f64)]) -> Result<Self, CalibrationError> {
        let arr: [(f64, f64); PARAMETER_COUNT] =
            ranges
                .try_into()
                .map_err(|_| CalibrationError::InvalidBounds {
                    parameter: "bounds table".to_string(),
                    reason: format!(
                        "expected {PARAMETER_COUNT} entries, found {}",
                        ranges.len()
                    ),
                })?;
        for (name, (low, high)) in PARAMETER_NAMES.iter().zip(arr) {
            validate_range(name, low, high)?;
        }
        Ok(Self { ranges: arr })
    }

    /// Replace one parameter's range by name.
    pub fn with_override(mut self, name: &str, low: f64, high: f64) -> Result<Self, CalibrationError> {
        let idx =
            parameter_index(name).ok_or_else(|| CalibrationError::UnknownParameter(name.to_string()))?;
        validate_range(PARAMETER_NAMES[idx], low, high)?;
        self.ranges[idx] = (low, high);
        Ok(self)
    }

    pub fn range(&self, index: usize) -> (f64, f64) {
        self.ranges[index]
    }

    pub fn ranges(&self) -> &[(f64, f64); PARAMETER_COUNT] {
        &self.ranges
    }

    /// Clamp every component into its box.
    pub fn project(&self, v: &[f64; PARAMETER_COUNT]) -> [f64; PARAMETER_COUNT] {
        let mut out = *v;
        for (x, (low, high)) in out.iter_mut().zip(self.ranges) {
            *x = x.clamp(low, high);
        }
        out
    }

    pub fn project_params(&self, params: &CouplingParameters) -> CouplingParameters {
        CouplingParameters::from_vector(&self.project(&params.to_vector()))
    }

    pub fn contains(&self, params: &CouplingParameters) -> bool {
        params
            .to_vector()
            .iter()
            .zip(self.ranges)
            .all(|(x, (low, high))| *x >= low && *x <= high)
    }
}

impl Default for ParameterBounds {
    fn default() -> Self {
        let kappa = (0.8, 1.5);
        Self {
            ranges: [
                kappa,
                kappa,
                kappa,
                kappa,
                (0.0, 0.3),
                (0.0, 0.2),
                (0.0, 0.2),
                (0.0, 0.3),
                (0.0, 0.3),
                (0.0, 0.3),
                (0.0, 0.3),
                (0.0, 0.2),
            ],
        }
    }
}

fn validate_range(name: &str, low: f64, high: f64) -> Result<(), CalibrationError> {
    if !low.is_finite() || !high.is_finite() {
        return Err(CalibrationError::InvalidBounds {
            parameter: name.to_string(),
            reason: "bounds must be finite".to_string(),
        });
    }
    if low > high {
        return Err(CalibrationError::InvalidBounds {
            parameter: name.to_string(),
            reason: format!("low {low} exceeds high {high}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theoretical_values() {
        let p = CouplingParameters::theoretical();
        assert_eq!(p.couplings(), [1.2, 1.3, 1.2, 1.1]);
        assert_eq!(p.bonus(StructuralFeature::History), 0.20);
        assert_eq!(p.bonus(StructuralFeature::TypeHints), 0.05);
        assert_eq!(p.get("bonus_logging"), Some(0.12));
        assert_eq!(p.get("bonus_telepathy"), None);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = CouplingParameters::from_slice(&[1.0; 11]).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::DimensionMismatch {
                expected: 12,
                found: 11
            }
        ));
    }

    #[test]
    fn test_toml_is_flat_and_strict() {
        let p = CouplingParameters::theoretical();
        let text = p.to_toml_string().unwrap();
        assert!(text.contains("kappa_lj = 1.2"));
        assert_eq!(CouplingParameters::from_toml_str(&text).unwrap(), p);

        let mut extra = text.clone();
        extra.push_str("bonus_telepathy = 0.5\n");
        assert!(CouplingParameters::from_toml_str(&extra).is_err());

        let missing: String = text
            .lines()
            .filter(|l| !l.starts_with("kappa_wl"))
            .map(|l| format!("{l}\n"))
            .collect();
        assert!(CouplingParameters::from_toml_str(&missing).is_err());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let text = CouplingParameters::theoretical().to_toml_string().unwrap();
        for bad in ["nan", "inf", "-inf"] {
            let edited = text.replace("bonus_state = 0.15", &format!("bonus_state = {bad}"));
            assert_ne!(edited, text);
            let err = CouplingParameters::from_toml_str(&edited).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { field, .. } if field == "bonus_state"),
                "{err}"
            );
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        std::fs::write(&path, text.replace("kappa_lj = 1.2", "kappa_lj = nan")).unwrap();
        let err = CouplingParameters::load(&path).unwrap_err();
        assert!(matches!(&err, ConfigError::InvalidValue { field, .. } if field == "kappa_lj"));
    }

    #[test]
    fn test_default_bounds_contain_theoretical() {
        let bounds = ParameterBounds::default();
        assert!(bounds.contains(&CouplingParameters::theoretical()));
    }

    #[test]
    fn test_project_clamps_into_box() {
        let bounds = ParameterBounds::default();
        let v = [2.0, 0.0, 1.0, 1.0, -1.0, 0.1, 0.1, 0.1, 0.1, 0.9, 0.1, 0.1];
        let projected = bounds.project(&v);
        assert_eq!(projected[0], 1.5);
        assert_eq!(projected[1], 0.8);
        assert_eq!(projected[4], 0.0);
        assert_eq!(projected[9], 0.3);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(ParameterBounds::new(&[(0.0, 1.0); 3]).is_err());
        let mut ranges = *ParameterBounds::default().ranges();
        ranges[2] = (1.0, 0.5);
        let err = ParameterBounds::new(&ranges).unwrap_err();
        assert!(err.to_string().contains("kappa_jl"));
        ranges[2] = (f64::NAN, 1.0);
        assert!(ParameterBounds::new(&ranges).is_err());
    }

    #[test]
    fn test_with_override() {
        let bounds = ParameterBounds::default()
            .with_override("bonus_state", 0.0, 0.5)
            .unwrap();
        assert_eq!(bounds.range(9), (0.0, 0.5));
        assert!(ParameterBounds::default()
            .with_override("kappa_xx", 0.0, 1.0)
            .is_err());
    }
}
