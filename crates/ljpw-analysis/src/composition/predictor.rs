//! The composition predictor.

use serde::Serialize;

use ljpw_core::config::CompositionConfig;
use ljpw_core::constants::{DEFAULT_HARMONY_BONUS_PER_FEATURE, DEFAULT_HARMONY_THRESHOLD};
use ljpw_core::types::{Axis, CouplingParameters, LjpwProfile, StructuralFlags};

use super::BonusTopology;

/// Extra lift on L, J and W once enough structural flags are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonyRule {
    pub threshold: usize,
    pub per_feature: f64,
}

impl HarmonyRule {
    /// `per_feature × (k − (threshold − 1))` when `k ≥ threshold`, else 0.
    pub fn bonus(&self, present: usize) -> f64 {
        if present >= self.threshold && self.threshold > 0 {
            self.per_feature * (present - (self.threshold - 1)) as f64
        } else {
            0.0
        }
    }
}

impl Default for HarmonyRule {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_HARMONY_THRESHOLD,
            per_feature: DEFAULT_HARMONY_BONUS_PER_FEATURE,
        }
    }
}

/// Every intermediate stage of one prediction, in L, J, P, W order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionBreakdown {
    pub components: usize,
    pub base: [f64; 4],
    pub coupled: [f64; 4],
    pub bonused: [f64; 4],
    pub harmony_bonus: f64,
    pub harmonized: [f64; 4],
    pub profile: LjpwProfile,
}

/// Predicts a composite profile from its components.
///
/// Pure: the same components, flags and parameters always give the same
/// profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionPredictor {
    params: CouplingParameters,
    topology: BonusTopology,
    harmony: HarmonyRule,
}

impl CompositionPredictor {
    pub fn new(params: CouplingParameters) -> Self {
        Self {
            params,
            topology: BonusTopology::reference(),
            harmony: HarmonyRule::default(),
        }
    }

    pub fn from_config(params: CouplingParameters, config: &CompositionConfig) -> Self {
        Self::new(params).with_harmony_rule(HarmonyRule {
            threshold: config.effective_harmony_threshold(),
            per_feature: config.effective_harmony_bonus_per_feature(),
        })
    }

    pub fn with_topology(mut self, topology: BonusTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_harmony_rule(mut self, harmony: HarmonyRule) -> Self {
        self.harmony = harmony;
        self
    }

    /// Same topology and harmony rule, different parameters.
    pub fn with_params(&self, params: CouplingParameters) -> Self {
        Self {
            params,
            topology: self.topology.clone(),
            harmony: self.harmony,
        }
    }

    pub fn params(&self) -> &CouplingParameters {
        &self.params
    }

    pub fn topology(&self) -> &BonusTopology {
        &self.topology
    }

    pub fn harmony_rule(&self) -> HarmonyRule {
        self.harmony
    }

    pub fn predict(&self, components: &[LjpwProfile], flags: &StructuralFlags) -> LjpwProfile {
        self.predict_breakdown(components, flags).profile
    }

    pub fn predict_breakdown(
        &self,
        components: &[LjpwProfile],
        flags: &StructuralFlags,
    ) -> CompositionBreakdown {
        if components.is_empty() {
            return CompositionBreakdown {
                components: 0,
                base: [0.0; 4],
                coupled: [0.0; 4],
                bonused: [0.0; 4],
                harmony_bonus: 0.0,
                harmonized: [0.0; 4],
                profile: LjpwProfile::zero(),
            };
        }

        let base = mean_profile(components);
        let coupled = self.couple(base);

        let mut bonused = coupled;
        for feature in flags.iter_present() {
            let bonus = self.params.bonus(feature);
            for target in self.topology.targets_of(feature) {
                bonused[target.axis.index()] += bonus * target.share;
            }
        }

        let harmony_bonus = self.harmony.bonus(flags.count());
        let mut harmonized = bonused;
        for axis in [Axis::Love, Axis::Justice, Axis::Wisdom] {
            harmonized[axis.index()] += harmony_bonus;
        }

        CompositionBreakdown {
            components: components.len(),
            base,
            coupled,
            bonused,
            harmony_bonus,
            harmonized,
            profile: LjpwProfile::from_array(harmonized),
        }
    }

    /// Coupling amplification. Every term reads the base values; W passes
    /// through unchanged.
    fn couple(&self, [l, j, p, w]: [f64; 4]) -> [f64; 4] {
        let CouplingParameters {
            kappa_lj,
            kappa_lp,
            kappa_jl,
            kappa_wl,
            ..
        } = self.params;
        let coupled_j = j * (1.0 + l * (kappa_lj - 1.0));
        let coupled_p = p * (1.0 + l * (kappa_lp - 1.0));
        let coupled_l = l * (1.0 + j * (kappa_jl - 1.0)) * (1.0 + w * (kappa_wl - 1.0));
        [coupled_l, coupled_j, coupled_p, w]
    }
}

impl Default for CompositionPredictor {
    fn default() -> Self {
        Self::new(CouplingParameters::theoretical())
    }
}

/// Unweighted per-axis arithmetic mean. `profiles` must be non-empty.
fn mean_profile(profiles: &[LjpwProfile]) -> [f64; 4] {
    let n = profiles.len() as f64;
    let mut sums = [0.0; 4];
    for profile in profiles {
        for (sum, v) in sums.iter_mut().zip(profile.as_array()) {
            *sum += v;
        }
    }
    sums.map(|s| s / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::BonusTarget;
    use ljpw_core::types::StructuralFeature;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_components_give_zero() {
        let flags = StructuralFlags::none()
            .with(StructuralFeature::Logging)
            .with(StructuralFeature::Testing)
            .with(StructuralFeature::State);
        let profile = CompositionPredictor::default().predict(&[], &flags);
        assert_eq!(profile, LjpwProfile::zero());
    }

    #[test]
    fn test_single_component_without_flags_is_coupling_only() {
        let predictor = CompositionPredictor::default();
        let c = LjpwProfile::new(0.5, 0.4, 0.3, 0.2);
        let breakdown = predictor.predict_breakdown(&[c], &StructuralFlags::none());
        assert_eq!(breakdown.base, c.as_array());
        assert_eq!(breakdown.bonused, breakdown.coupled);
        assert_eq!(breakdown.harmony_bonus, 0.0);

        // J' = 0.4 (1 + 0.5 × 0.2) = 0.44
        assert!(approx(breakdown.coupled[1], 0.44));
        // P' = 0.3 (1 + 0.5 × 0.3) = 0.345
        assert!(approx(breakdown.coupled[2], 0.345));
        // L'' = 0.5 (1 + 0.4 × 0.2)(1 + 0.2 × 0.1) = 0.5508
        assert!(approx(breakdown.coupled[0], 0.5508));
        assert!(approx(breakdown.coupled[3], 0.2));
    }

    #[test]
    fn test_secure_add_regression() {
        // L = 1 + logging 0.12 clamps to 1; J = validation 0.10; two flags, no harmony.
        let flags = StructuralFlags::from_pairs([("has_validation", true), ("has_logging", true)]);
        let profile = CompositionPredictor::default()
            .predict(&[LjpwProfile::new(1.0, 0.0, 0.0, 0.0)], &flags);
        assert!(approx(profile.love(), 1.0));
        assert!(approx(profile.justice(), 0.10));
        assert!(approx(profile.power(), 0.0));
        assert!(approx(profile.wisdom(), 0.0));
    }

    #[test]
    fn test_harmony_rule_starts_at_threshold() {
        let rule = HarmonyRule::default();
        assert_eq!(rule.bonus(2), 0.0);
        assert!(approx(rule.bonus(3), 0.05));
        assert!(approx(rule.bonus(8), 0.30));
    }

    #[test]
    fn test_harmony_skips_power() {
        let c = LjpwProfile::new(0.2, 0.2, 0.2, 0.2);
        let flags = StructuralFlags::none()
            .with(StructuralFeature::Docstring)
            .with(StructuralFeature::Logging)
            .with(StructuralFeature::History);
        let breakdown = CompositionPredictor::default().predict_breakdown(&[c], &flags);
        assert!(approx(breakdown.harmony_bonus, 0.05));
        assert_eq!(breakdown.harmonized[2], breakdown.bonused[2]);
        assert!(approx(breakdown.harmonized[3] - breakdown.bonused[3], 0.05));
    }

    #[test]
    fn test_custom_topology_is_respected() {
        let topology = BonusTopology::new(vec![BonusTarget {
            feature: StructuralFeature::Logging,
            axis: Axis::Power,
            share: 1.0,
        }]);
        let predictor = CompositionPredictor::default().with_topology(topology);
        let flags = StructuralFlags::none().with(StructuralFeature::Logging);
        let profile = predictor.predict(&[LjpwProfile::zero()], &flags);
        assert!(approx(profile.power(), 0.12));
        assert_eq!(profile.love(), 0.0);
    }
}
