//! Fixed-percentage reduction used when no numerical optimizer is wanted.

use ljpw_core::constants::{DEFAULT_FALLBACK_BONUS_REDUCTION, DEFAULT_FALLBACK_COUPLING_REDUCTION};
use ljpw_core::types::{CouplingParameters, ParameterBounds};

use super::{CalibrationStatus, Objective, Optimizer, OptimizerRun};

/// Scales couplings and bonuses down by fixed shares, then projects into
/// bounds. Ignores the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackReduction {
    coupling_reduction: f64,
    bonus_reduction: f64,
}

impl FallbackReduction {
    pub fn new(coupling_reduction: f64, bonus_reduction: f64) -> Self {
        Self {
            coupling_reduction,
            bonus_reduction,
        }
    }

    pub fn reduce(&self, start: &CouplingParameters, bounds: &ParameterBounds) -> CouplingParameters {
        let mut v = start.to_vector();
        for (i, x) in v.iter_mut().enumerate() {
            let share = if i < 4 {
                self.coupling_reduction
            } else {
                self.bonus_reduction
            };
            *x *= 1.0 - share;
        }
        CouplingParameters::from_vector(&bounds.project(&v))
    }
}

impl Default for FallbackReduction {
    fn default() -> Self {
        Self::new(
            DEFAULT_FALLBACK_COUPLING_REDUCTION,
            DEFAULT_FALLBACK_BONUS_REDUCTION,
        )
    }
}

impl Optimizer for FallbackReduction {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn optimize(
        &self,
        _objective: &Objective<'_>,
        start: &CouplingParameters,
        bounds: &ParameterBounds,
    ) -> OptimizerRun {
        OptimizerRun {
            params: self.reduce(start, bounds),
            status: CalibrationStatus::Fallback,
            iterations: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduces_theoretical_defaults() {
        let reduced = FallbackReduction::default()
            .reduce(&CouplingParameters::theoretical(), &ParameterBounds::default());
        assert!((reduced.kappa_lj - 0.9).abs() < 1e-12);
        assert!((reduced.kappa_lp - 0.975).abs() < 1e-12);
        assert!((reduced.kappa_wl - 0.825).abs() < 1e-12);
        assert!((reduced.bonus_history - 0.14).abs() < 1e-12);
        assert!((reduced.bonus_logging - 0.084).abs() < 1e-12);
    }

    #[test]
    fn test_result_is_projected_into_bounds() {
        // 0.9 × 0.75 = 0.675 falls below the 0.8 coupling floor.
        let start = CouplingParameters {
            kappa_jl: 0.9,
            ..CouplingParameters::theoretical()
        };
        let reduced = FallbackReduction::default().reduce(&start, &ParameterBounds::default());
        assert_eq!(reduced.kappa_jl, 0.8);
    }
}
