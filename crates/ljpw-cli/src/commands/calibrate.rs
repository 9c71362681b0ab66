//! `ljpw calibrate`

use std::path::{Path, PathBuf};

use serde::Serialize;

use ljpw_analysis::calibration::{
    load_training_set, reference_training_set, CalibrationEngine, CalibrationOutcome,
    ExampleReport, HoldoutReport,
};
use ljpw_core::config::{CliOverrides, OptimizerKind};
use ljpw_core::LjpwError;

use super::{format_profile, load_config, path_string, print_json, resolve_parameters};

pub struct CalibrateArgs {
    pub training: Option<PathBuf>,
    pub params: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub optimizer: Option<OptimizerKind>,
    pub max_iterations: Option<usize>,
    pub holdout: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct CalibrateOutput<'a> {
    message: &'static str,
    outcome: &'a CalibrationOutcome,
    examples: &'a [ExampleReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    holdout: Option<&'a HoldoutReport>,
}

pub fn run(args: CalibrateArgs) -> Result<(), LjpwError> {
    let config = load_config(
        Path::new("."),
        CliOverrides {
            optimizer: args.optimizer,
            max_iterations: args.max_iterations,
            parameters_path: path_string(args.params),
            ..CliOverrides::default()
        },
    )?;
    let initial = resolve_parameters(&config)?;
    let examples = match &args.training {
        Some(path) => load_training_set(path)?,
        None => reference_training_set(),
    };

    let engine = CalibrationEngine::from_config(&config)?;
    let outcome = engine.calibrate(&examples, &initial)?;
    let rows = engine.report(&examples, &initial, &outcome.params);
    let holdout = if args.holdout {
        Some(engine.leave_one_out(&examples, &initial)?)
    } else {
        None
    };

    if let Some(out) = &args.out {
        outcome.params.save(out)?;
        tracing::info!(path = %out.display(), "saved calibrated parameters");
    }

    if args.json {
        return print_json(&CalibrateOutput {
            message: outcome.status.message(),
            outcome: &outcome,
            examples: &rows,
            holdout: holdout.as_ref(),
        });
    }

    println!("{}", outcome.status.message());
    println!(
        "optimizer {}  iterations {}  mse {:.6} -> {:.6} ({:.1}% better)",
        outcome.optimizer,
        outcome.iterations,
        outcome.initial_mse,
        outcome.final_mse,
        outcome.improvement() * 100.0
    );
    if outcome.kept_initial {
        println!("optimizer result was worse; kept the starting parameters");
    }
    println!();
    for row in &rows {
        println!("{}", row.description);
        println!("  actual  {}", format_profile(row.actual.as_array()));
        println!(
            "  before  {}  error {:.4}",
            format_profile(row.before.as_array()),
            row.error_before
        );
        println!(
            "  after   {}  error {:.4}",
            format_profile(row.after.as_array()),
            row.error_after
        );
    }
    if let Some(holdout) = &holdout {
        println!();
        println!("leave-one-out mean squared error {:.6}", holdout.mean_error);
    }
    println!();
    print!("{}", outcome.params);
    Ok(())
}
