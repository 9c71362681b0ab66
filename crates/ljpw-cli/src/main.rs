#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ljpw_core::config::OptimizerKind;
use ljpw_core::{LjpwError, LjpwErrorCode};

mod commands;

#[derive(Parser)]
#[command(name = "ljpw", version, about = "LJPW composition model: scan, predict, calibrate, diagnose")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile every supported source file under a directory
    Scan {
        root: PathBuf,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
        #[arg(long)]
        max_file_size: Option<u64>,
        /// Worker threads (0 = auto)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Predict a composite profile from component profiles and flags
    Predict {
        /// JSON object with `components` and optional `flags`
        #[arg(long)]
        input: PathBuf,
        /// Coupling parameters file (.toml or .json)
        #[arg(long)]
        params: Option<PathBuf>,
        /// Show every intermediate stage
        #[arg(long)]
        breakdown: bool,
        #[arg(long)]
        json: bool,
    },
    /// Fit coupling parameters to training examples
    Calibrate {
        /// JSON array of training examples; defaults to the reference set
        #[arg(long)]
        training: Option<PathBuf>,
        /// Starting parameters file
        #[arg(long)]
        params: Option<PathBuf>,
        /// Write the calibrated parameters here (.toml or .json)
        #[arg(long)]
        out: Option<PathBuf>,
        /// projected-gradient or fallback
        #[arg(long)]
        optimizer: Option<OptimizerKind>,
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Also report leave-one-out holdout error
        #[arg(long)]
        holdout: bool,
        #[arg(long)]
        json: bool,
    },
    /// Full metric diagnostic of a single profile
    Diagnose {
        #[arg(long, allow_negative_numbers = true)]
        love: f64,
        #[arg(long, allow_negative_numbers = true)]
        justice: f64,
        #[arg(long, allow_negative_numbers = true)]
        power: f64,
        #[arg(long, allow_negative_numbers = true)]
        wisdom: f64,
        #[arg(long, default_value_t = 1)]
        concepts: usize,
        /// Base clarity before dominance adjustment
        #[arg(long, default_value_t = 0.5)]
        clarity: f64,
        #[arg(long, default_value = "entity")]
        name: String,
        #[arg(long)]
        json: bool,
    },
}

fn run(cli: Cli) -> Result<(), LjpwError> {
    match cli.command {
        Commands::Scan {
            root,
            json,
            max_file_size,
            threads,
        } => commands::scan::run(&root, json, max_file_size, threads),
        Commands::Predict {
            input,
            params,
            breakdown,
            json,
        } => commands::predict::run(&input, params, breakdown, json),
        Commands::Calibrate {
            training,
            params,
            out,
            optimizer,
            max_iterations,
            holdout,
            json,
        } => commands::calibrate::run(commands::calibrate::CalibrateArgs {
            training,
            params,
            out,
            optimizer,
            max_iterations,
            holdout,
            json,
        }),
        Commands::Diagnose {
            love,
            justice,
            power,
            wisdom,
            concepts,
            clarity,
            name,
            json,
        } => commands::diagnose::run(
            [love, justice, power, wisdom],
            concepts,
            clarity,
            &name,
            json,
        ),
    }
}

fn main() -> ExitCode {
    ljpw_core::tracing::init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.tagged_string());
            if e.is_invalid_argument() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
