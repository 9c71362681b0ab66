//! Calibration engine behaviour through the public API.

use ljpw_analysis::calibration::{
    parse_training_set, reference_training_set, CalibrationEngine, FallbackReduction,
    ProjectedGradient,
};
use ljpw_analysis::CalibrationStatus;
use ljpw_core::config::{LjpwConfig, OptimizerKind};
use ljpw_core::errors::CalibrationError;
use ljpw_core::types::{CouplingParameters, ParameterBounds};

#[test]
fn projected_gradient_is_never_worse() {
    let engine = CalibrationEngine::new(Box::new(ProjectedGradient::default()), ParameterBounds::default());
    let examples = reference_training_set();
    let initial = CouplingParameters::theoretical();
    let outcome = engine.calibrate(&examples, &initial).unwrap();

    assert!(!outcome.used_fallback());
    assert!(outcome.final_mse <= outcome.initial_mse);
    assert!(ParameterBounds::default().contains(&outcome.params));
    let rescored = engine.evaluate(&outcome.params, &examples).unwrap();
    assert!((rescored - outcome.final_mse).abs() < 1e-12);
}

#[test]
fn fallback_is_never_worse_and_reports_itself() {
    let engine = CalibrationEngine::new(Box::new(FallbackReduction::default()), ParameterBounds::default());
    let outcome = engine
        .calibrate(&reference_training_set(), &CouplingParameters::theoretical())
        .unwrap();
    assert!(outcome.used_fallback());
    assert_eq!(outcome.status, CalibrationStatus::Fallback);
    assert_eq!(outcome.iterations, 0);
    assert!(outcome.final_mse <= outcome.initial_mse);
}

#[test]
fn engine_from_config_honours_optimizer_and_bounds() {
    let config = LjpwConfig::from_toml(
        r#"
[calibration]
optimizer = "fallback"

[calibration.bounds]
bonus_logging = [0.0, 0.05]
"#,
    )
    .unwrap();
    assert_eq!(config.calibration.effective_optimizer(), OptimizerKind::Fallback);

    let engine = CalibrationEngine::from_config(&config).unwrap();
    assert_eq!(engine.optimizer_name(), "fallback");
    assert_eq!(engine.bounds().range(7), (0.0, 0.05));
}

#[test]
fn empty_training_set_is_an_error() {
    let engine = CalibrationEngine::default();
    let err = engine
        .calibrate(&[], &CouplingParameters::theoretical())
        .unwrap_err();
    assert!(matches!(err, CalibrationError::EmptyTrainingSet));
}

#[test]
fn leave_one_out_covers_every_example() {
    let engine = CalibrationEngine::new(Box::new(FallbackReduction::default()), ParameterBounds::default());
    let examples = reference_training_set();
    let report = engine
        .leave_one_out(&examples, &CouplingParameters::theoretical())
        .unwrap();
    assert_eq!(report.folds.len(), examples.len());
    assert!(report.mean_error >= 0.0);
    assert_eq!(report.folds[0].description, examples[0].description);
}

#[test]
fn training_set_parses_from_json() {
    let json = r#"[
        {
            "description": "guarded add",
            "components": [{"L": 1.0, "J": 0.0, "P": 0.0, "W": 0.0}],
            "flags": {"has_validation": true, "has_unknown": true},
            "actual": {"L": 0.2, "J": 0.2, "P": 0.2, "W": 0.4}
        },
        {
            "components": [{"L": 0.5, "J": 0.5, "P": 0.5, "W": 0.5}],
            "actual": {"L": 0.5, "J": 0.5, "P": 0.5, "W": 0.5}
        }
    ]"#;
    let examples = parse_training_set(json).unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].flags.count(), 1);
    assert!(examples[1].description.is_empty());

    let outcome = CalibrationEngine::default()
        .calibrate(&examples, &CouplingParameters::theoretical())
        .unwrap();
    assert!(outcome.final_mse <= outcome.initial_mse);
}

#[test]
fn training_set_with_missing_axis_is_rejected() {
    let json = r#"[{"components": [{"L": 1.0, "J": 0.0, "P": 0.0}], "actual": {"L": 0, "J": 0, "P": 0, "W": 0}}]"#;
    assert!(matches!(
        parse_training_set(json),
        Err(CalibrationError::InvalidTrainingData(_))
    ));
}
