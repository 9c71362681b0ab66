//! The calibration engine.

use serde::Serialize;
use std::time::Instant;

use ljpw_core::config::LjpwConfig;
use ljpw_core::errors::CalibrationError;
use ljpw_core::types::{CouplingParameters, LjpwProfile, ParameterBounds};

use super::{create_optimizer, CalibrationStatus, Objective, Optimizer, TrainingExample};
use crate::composition::CompositionPredictor;

/// Result of one calibration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationOutcome {
    pub params: CouplingParameters,
    pub status: CalibrationStatus,
    pub initial_mse: f64,
    pub final_mse: f64,
    pub iterations: usize,
    pub optimizer: String,
    /// True when the optimizer's candidate scored worse than the starting
    /// point and the starting parameters were returned instead.
    pub kept_initial: bool,
}

impl CalibrationOutcome {
    pub fn used_fallback(&self) -> bool {
        self.status == CalibrationStatus::Fallback
    }

    pub fn converged(&self) -> bool {
        self.status == CalibrationStatus::Converged
    }

    /// Relative MSE reduction, 0 when the starting error was already 0.
    pub fn improvement(&self) -> f64 {
        if self.initial_mse > 0.0 {
            (self.initial_mse - self.final_mse) / self.initial_mse
        } else {
            0.0
        }
    }
}

/// Before/after comparison for one training example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleReport {
    pub description: String,
    pub actual: LjpwProfile,
    pub before: LjpwProfile,
    pub after: LjpwProfile,
    pub error_before: f64,
    pub error_after: f64,
}

/// Squared error on one held-out example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldoutFold {
    pub description: String,
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldoutReport {
    pub folds: Vec<HoldoutFold>,
    pub mean_error: f64,
}

/// Fits [`CouplingParameters`] to training examples.
pub struct CalibrationEngine {
    optimizer: Box<dyn Optimizer>,
    bounds: ParameterBounds,
    predictor: CompositionPredictor,
}

impl CalibrationEngine {
    pub fn new(optimizer: Box<dyn Optimizer>, bounds: ParameterBounds) -> Self {
        Self {
            optimizer,
            bounds,
            predictor: CompositionPredictor::default(),
        }
    }

    /// Engine configured from the `calibration` and `composition` sections.
    pub fn from_config(config: &LjpwConfig) -> Result<Self, CalibrationError> {
        let bounds = config.calibration.effective_bounds()?;
        Ok(Self::new(create_optimizer(&config.calibration), bounds).with_predictor(
            CompositionPredictor::from_config(
                CouplingParameters::theoretical(),
                &config.composition,
            ),
        ))
    }

    /// Predictor whose topology and harmony rule the objective uses.
    pub fn with_predictor(mut self, predictor: CompositionPredictor) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn optimizer_name(&self) -> &'static str {
        self.optimizer.name()
    }

    pub fn bounds(&self) -> &ParameterBounds {
        &self.bounds
    }

    /// Mean squared prediction error of `params` over `examples`.
    pub fn evaluate(
        &self,
        params: &CouplingParameters,
        examples: &[TrainingExample],
    ) -> Result<f64, CalibrationError> {
        Ok(Objective::new(&self.predictor, examples)?.evaluate(params))
    }

    /// Fit parameters starting from `initial`. The returned parameters never
    /// score worse than `initial`.
    pub fn calibrate(
        &self,
        examples: &[TrainingExample],
        initial: &CouplingParameters,
    ) -> Result<CalibrationOutcome, CalibrationError> {
        let objective = Objective::new(&self.predictor, examples)?;
        if !initial.is_finite() {
            return Err(CalibrationError::InvalidTrainingData(
                "initial parameters must be finite".to_string(),
            ));
        }

        let started = Instant::now();
        let initial_mse = objective.evaluate(initial);
        let run = self.optimizer.optimize(&objective, initial, &self.bounds);
        let candidate_mse = objective.evaluate(&run.params);

        let (params, final_mse, kept_initial) = if candidate_mse > initial_mse {
            tracing::warn!(
                optimizer = self.optimizer.name(),
                initial_mse,
                candidate_mse,
                "candidate is worse than the starting point, keeping initial parameters"
            );
            (*initial, initial_mse, true)
        } else {
            (run.params, candidate_mse, false)
        };

        tracing::info!(
            optimizer = self.optimizer.name(),
            examples = examples.len(),
            initial_mse,
            final_mse,
            iterations = run.iterations,
            status = ?run.status,
            calibration_time = started.elapsed().as_millis() as u64,
            "calibration finished"
        );

        Ok(CalibrationOutcome {
            params,
            status: run.status,
            initial_mse,
            final_mse,
            iterations: run.iterations,
            optimizer: self.optimizer.name().to_string(),
            kept_initial,
        })
    }

    /// Calibrate on every example but one, score the held-out one, and
    /// repeat for each example.
    pub fn leave_one_out(
        &self,
        examples: &[TrainingExample],
        initial: &CouplingParameters,
    ) -> Result<HoldoutReport, CalibrationError> {
        if examples.len() < 2 {
            return Err(CalibrationError::InvalidTrainingData(
                "leave-one-out needs at least two examples".to_string(),
            ));
        }

        let mut folds = Vec::with_capacity(examples.len());
        for (i, held_out) in examples.iter().enumerate() {
            let training: Vec<TrainingExample> = examples
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, e)| e.clone())
                .collect();
            let outcome = self.calibrate(&training, initial)?;
            let error = self.evaluate(&outcome.params, std::slice::from_ref(held_out))?;
            folds.push(HoldoutFold {
                description: held_out.description.clone(),
                error,
            });
        }

        let mean_error =
            folds.iter().fold(0.0, |acc, f| acc + f.error) / folds.len() as f64;
        Ok(HoldoutReport { folds, mean_error })
    }

    /// Per-example predictions and errors under two parameter sets.
    pub fn report(
        &self,
        examples: &[TrainingExample],
        before: &CouplingParameters,
        after: &CouplingParameters,
    ) -> Vec<ExampleReport> {
        let before_predictor = self.predictor.with_params(*before);
        let after_predictor = self.predictor.with_params(*after);
        examples
            .iter()
            .map(|example| {
                let b = before_predictor.predict(&example.components, &example.flags);
                let a = after_predictor.predict(&example.components, &example.flags);
                ExampleReport {
                    description: example.description.clone(),
                    actual: example.actual,
                    before: b,
                    after: a,
                    error_before: b.distance_to(&example.actual),
                    error_after: a.distance_to(&example.actual),
                }
            })
            .collect()
    }
}

impl Default for CalibrationEngine {
    fn default() -> Self {
        Self::new(
            Box::new(super::ProjectedGradient::default()),
            ParameterBounds::default(),
        )
    }
}
