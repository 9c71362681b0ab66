//! Labeled composition examples.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ljpw_core::errors::CalibrationError;
use ljpw_core::types::{LjpwProfile, StructuralFeature, StructuralFlags};

/// One observed composition: components, flags, and the profile actually
/// measured for the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(default)]
    pub description: String,
    pub components: Vec<LjpwProfile>,
    #[serde(default)]
    pub flags: StructuralFlags,
    pub actual: LjpwProfile,
}

impl TrainingExample {
    pub fn new(
        description: impl Into<String>,
        components: Vec<LjpwProfile>,
        flags: StructuralFlags,
        actual: LjpwProfile,
    ) -> Self {
        Self {
            description: description.into(),
            components,
            flags,
            actual,
        }
    }
}

/// Load examples from a JSON array.
pub fn load_training_set(path: &Path) -> Result<Vec<TrainingExample>, CalibrationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CalibrationError::InvalidTrainingData(format!("{}: {e}", path.display()))
    })?;
    parse_training_set(&content)
}

/// Parse examples from a JSON array string.
pub fn parse_training_set(content: &str) -> Result<Vec<TrainingExample>, CalibrationError> {
    serde_json::from_str(content).map_err(|e| CalibrationError::InvalidTrainingData(e.to_string()))
}

/// The thirteen reference examples from the calculator experiments.
pub fn reference_training_set() -> Vec<TrainingExample> {
    use StructuralFeature::{Logging, State, Validation};

    let p = LjpwProfile::new;
    let none = StructuralFlags::none;
    let secured = || none().with(Validation).with(Logging);
    let quarter = p(0.25, 0.25, 0.25, 0.25);
    let third = p(0.333, 0.333, 0.333, 0.0);
    let add = p(1.0, 0.0, 0.0, 0.0);
    let validate = p(0.0, 1.0, 0.0, 0.0);
    let log = p(0.5, 0.5, 0.0, 0.0);
    let divide = p(0.0, 0.5, 0.5, 0.0);
    let zero = LjpwProfile::zero();

    vec![
        TrainingExample::new(
            "secure_add function",
            vec![add, validate, log],
            secured(),
            p(0.2, 0.2, 0.2, 0.4),
        ),
        TrainingExample::new("SimpleCalculator class", vec![third, third], none(), third),
        TrainingExample::new("SecureCalculator class", vec![quarter; 4], none(), quarter),
        TrainingExample::new(
            "secure_subtract function",
            vec![zero, validate, log],
            secured(),
            quarter,
        ),
        TrainingExample::new(
            "secure_multiply function",
            vec![zero, validate, log],
            secured(),
            quarter,
        ),
        TrainingExample::new(
            "secure_divide function",
            vec![divide, validate, log],
            secured(),
            quarter,
        ),
        TrainingExample::new("simple_add function", vec![add], none(), third),
        TrainingExample::new("simple_multiply function", vec![zero], none(), third),
        TrainingExample::new("Zero primitive aggregation", vec![zero, zero], none(), zero),
        TrainingExample::new(
            "Mixed primitive aggregation",
            vec![add, divide],
            none(),
            p(0.5, 0.25, 0.25, 0.0),
        ),
        TrainingExample::new(
            "Validation + Logging composition",
            vec![validate, log],
            none(),
            p(0.25, 0.75, 0.0, 0.0),
        ),
        TrainingExample::new(
            "Full primitive set",
            vec![add, validate, log, divide],
            none(),
            p(0.375, 0.5, 0.125, 0.0),
        ),
        TrainingExample::new(
            "StatefulCalculator (inferred)",
            vec![quarter, quarter],
            none().with(State),
            p(0.25, 0.35, 0.25, 0.40),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_set_shape() {
        let examples = reference_training_set();
        assert_eq!(examples.len(), 13);
        assert_eq!(examples[0].components.len(), 3);
        assert_eq!(examples[0].flags.count(), 2);
        assert!(examples[12].flags.is_set(StructuralFeature::State));
    }

    #[test]
    fn test_parse_training_set_json() {
        let json = r#"[
            {
                "description": "pair",
                "components": [{"L": 1.0, "J": 0.0, "P": 0.0, "W": 0.0}],
                "flags": {"has_logging": true, "has_mystery": true},
                "actual": {"L": 0.5, "J": 0.5, "P": 0.0, "W": 0.0}
            },
            {
                "components": [],
                "actual": {"L": 0.0, "J": 0.0, "P": 0.0, "W": 0.0}
            }
        ]"#;
        let examples = parse_training_set(json).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].flags.count(), 1);
        assert_eq!(examples[1].description, "");
    }

    #[test]
    fn test_parse_rejects_missing_axis() {
        let json = r#"[{"components": [], "actual": {"L": 0.1, "J": 0.1, "P": 0.1}}]"#;
        let err = parse_training_set(json).unwrap_err();
        assert!(err.to_string().contains("Axis W is missing"));
    }
}
