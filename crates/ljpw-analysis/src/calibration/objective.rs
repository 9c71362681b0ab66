//! Mean squared prediction error over a training set.

use ljpw_core::errors::CalibrationError;
use ljpw_core::types::{CouplingParameters, ParameterBounds, PARAMETER_COUNT};

use super::TrainingExample;
use crate::composition::CompositionPredictor;

/// Relative finite-difference step.
const GRADIENT_STEP: f64 = 1e-6;

/// The calibration objective for a fixed predictor shape.
///
/// `predictor` supplies the topology and harmony rule; its parameters are
/// replaced by each evaluated point.
pub struct Objective<'a> {
    predictor: &'a CompositionPredictor,
    examples: &'a [TrainingExample],
}

impl<'a> Objective<'a> {
    pub fn new(
        predictor: &'a CompositionPredictor,
        examples: &'a [TrainingExample],
    ) -> Result<Self, CalibrationError> {
        if examples.is_empty() {
            return Err(CalibrationError::EmptyTrainingSet);
        }
        Ok(Self {
            predictor,
            examples,
        })
    }

    pub fn examples(&self) -> &[TrainingExample] {
        self.examples
    }

    /// MSE at a parameter set.
    pub fn evaluate(&self, params: &CouplingParameters) -> f64 {
        let predictor = self.predictor.with_params(*params);
        let total = self
            .examples
            .iter()
            .map(|example| {
                let error = predictor
                    .predict(&example.components, &example.flags)
                    .distance_to(&example.actual);
                error * error
            })
            .fold(0.0, |acc, sq| acc + sq);
        total / self.examples.len() as f64
    }

    /// MSE at a packed parameter vector.
    pub fn value(&self, x: &[f64; PARAMETER_COUNT]) -> f64 {
        self.evaluate(&CouplingParameters::from_vector(x))
    }

    /// Central-difference gradient, with each probe kept inside `bounds`.
    /// A coordinate whose box has zero width gets a zero derivative.
    pub fn gradient(
        &self,
        x: &[f64; PARAMETER_COUNT],
        bounds: &ParameterBounds,
    ) -> [f64; PARAMETER_COUNT] {
        let mut grad = [0.0; PARAMETER_COUNT];
        for (i, g) in grad.iter_mut().enumerate() {
            let (low, high) = bounds.range(i);
            let h = GRADIENT_STEP * x[i].abs().max(1.0);
            let mut plus = *x;
            let mut minus = *x;
            plus[i] = (x[i] + h).min(high);
            minus[i] = (x[i] - h).max(low);
            let width = plus[i] - minus[i];
            if width > 0.0 {
                *g = (self.value(&plus) - self.value(&minus)) / width;
            }
        }
        grad
    }
}
