//! Projected gradient descent with Barzilai-Borwein steps.
//!
//! Each iteration projects `x − α∇f` back into the bounds box and
//! backtracks on α until the Armijo condition holds. The next trial step
//! is the BB1 estimate `sᵀs / sᵀy`.

use ljpw_core::constants::{DEFAULT_GRADIENT_TOLERANCE, DEFAULT_MAX_ITERATIONS};
use ljpw_core::types::{CouplingParameters, ParameterBounds, PARAMETER_COUNT};

use super::{CalibrationStatus, Objective, Optimizer, OptimizerRun};

type Vector = [f64; PARAMETER_COUNT];

/// Sufficient-decrease constant.
const ARMIJO: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 40;
const MIN_STEP: f64 = 1e-8;
const MAX_STEP: f64 = 1e4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedGradient {
    max_iterations: usize,
    tolerance: f64,
}

impl ProjectedGradient {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl Default for ProjectedGradient {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, DEFAULT_GRADIENT_TOLERANCE)
    }
}

impl Optimizer for ProjectedGradient {
    fn name(&self) -> &'static str {
        "projected-gradient"
    }

    fn optimize(
        &self,
        objective: &Objective<'_>,
        start: &CouplingParameters,
        bounds: &ParameterBounds,
    ) -> OptimizerRun {
        let finish = |x: &Vector, status: CalibrationStatus, iterations: usize| OptimizerRun {
            params: CouplingParameters::from_vector(x),
            status,
            iterations,
        };

        let mut x = bounds.project(&start.to_vector());
        let mut fx = objective.value(&x);
        let mut g = objective.gradient(&x, bounds);
        let mut step = 1.0 / norm_inf(&g).max(1.0);

        for iteration in 0..self.max_iterations {
            if projected_gradient_norm(&x, &g, bounds) <= self.tolerance {
                return finish(&x, CalibrationStatus::Converged, iteration);
            }

            let Some((next, f_next)) = line_search(objective, bounds, &x, fx, &g, step) else {
                // No representable descent step remains.
                tracing::debug!(iteration, mse = fx, "line search exhausted");
                return finish(&x, CalibrationStatus::Converged, iteration);
            };

            let s = sub(&next, &x);
            let improvement = fx - f_next;
            let g_next = objective.gradient(&next, bounds);
            let y = sub(&g_next, &g);
            let sy = dot(&s, &y);
            step = if sy > f64::EPSILON {
                (dot(&s, &s) / sy).clamp(MIN_STEP, MAX_STEP)
            } else {
                1.0 / norm_inf(&g_next).max(1.0)
            };

            x = next;
            fx = f_next;
            g = g_next;
            tracing::trace!(iteration, mse = fx, step, "projected gradient step");

            if norm_inf(&s) <= f64::EPSILON || improvement <= self.tolerance * (1.0 + fx) {
                return finish(&x, CalibrationStatus::Converged, iteration + 1);
            }
        }

        finish(&x, CalibrationStatus::IterationLimit, self.max_iterations)
    }
}

/// Backtracking along the projection arc. Returns the accepted point and
/// its objective value.
fn line_search(
    objective: &Objective<'_>,
    bounds: &ParameterBounds,
    x: &Vector,
    fx: f64,
    g: &Vector,
    initial_step: f64,
) -> Option<(Vector, f64)> {
    let mut alpha = initial_step;
    for _ in 0..MAX_BACKTRACKS {
        let mut trial = *x;
        for (t, gi) in trial.iter_mut().zip(g) {
            *t -= alpha * gi;
        }
        let candidate = bounds.project(&trial);
        let decrease = dot(g, &sub(&candidate, x));
        let f_candidate = objective.value(&candidate);
        if decrease < 0.0 && f_candidate <= fx + ARMIJO * decrease {
            return Some((candidate, f_candidate));
        }
        alpha *= 0.5;
    }
    None
}

/// ‖x − P(x − g)‖∞: zero exactly at a box-constrained stationary point.
fn projected_gradient_norm(x: &Vector, g: &Vector, bounds: &ParameterBounds) -> f64 {
    let mut trial = *x;
    for (t, gi) in trial.iter_mut().zip(g) {
        *t -= gi;
    }
    norm_inf(&sub(x, &bounds.project(&trial)))
}

fn sub(a: &Vector, b: &Vector) -> Vector {
    let mut out = *a;
    for (o, bi) in out.iter_mut().zip(b) {
        *o -= bi;
    }
    out
}

fn dot(a: &Vector, b: &Vector) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

fn norm_inf(v: &Vector) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{reference_training_set, TrainingExample};
    use crate::composition::CompositionPredictor;
    use ljpw_core::types::{LjpwProfile, StructuralFeature, StructuralFlags};

    #[test]
    fn test_improves_reference_fit() {
        let predictor = CompositionPredictor::default();
        let examples = reference_training_set();
        let objective = Objective::new(&predictor, &examples).unwrap();
        let bounds = ParameterBounds::default();
        let start = CouplingParameters::theoretical();

        let run = ProjectedGradient::default().optimize(&objective, &start, &bounds);
        assert!(bounds.contains(&run.params));
        assert!(objective.evaluate(&run.params) < objective.evaluate(&start));
        assert!(run.iterations > 0);
    }

    #[test]
    fn test_recovers_a_single_bonus() {
        // The only signal is J = 0.3 from an otherwise empty composite with
        // error handling, so the optimum is bonus_error_handling = 0.2 (its
        // upper bound) with J still short of the target.
        let predictor = CompositionPredictor::default();
        let examples = vec![TrainingExample::new(
            "errors only",
            vec![LjpwProfile::zero()],
            StructuralFlags::none().with(StructuralFeature::ErrorHandling),
            LjpwProfile::new(0.0, 0.3, 0.0, 0.0),
        )];
        let objective = Objective::new(&predictor, &examples).unwrap();
        let run = ProjectedGradient::default().optimize(
            &objective,
            &CouplingParameters::theoretical(),
            &ParameterBounds::default(),
        );
        assert!((run.params.bonus_error_handling - 0.2).abs() < 1e-6);
        assert_eq!(run.status, CalibrationStatus::Converged);
    }

    #[test]
    fn test_iteration_limit_is_reported() {
        let predictor = CompositionPredictor::default();
        let examples = reference_training_set();
        let objective = Objective::new(&predictor, &examples).unwrap();
        let run = ProjectedGradient::new(1, 0.0).optimize(
            &objective,
            &CouplingParameters::theoretical(),
            &ParameterBounds::default(),
        );
        assert!(matches!(
            run.status,
            CalibrationStatus::IterationLimit | CalibrationStatus::Converged
        ));
        assert!(run.iterations <= 1);
    }
}
