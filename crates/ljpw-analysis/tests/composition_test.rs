//! Composition predictor laws.

use proptest::prelude::*;

use ljpw_analysis::composition::{CompositionPredictor, HarmonyRule};
use ljpw_core::types::{CouplingParameters, LjpwProfile, StructuralFeature, StructuralFlags};

fn profile() -> impl Strategy<Value = LjpwProfile> {
    (-0.5f64..1.5, -0.5f64..1.5, -0.5f64..1.5, -0.5f64..1.5)
        .prop_map(|(l, j, p, w)| LjpwProfile::new(l, j, p, w))
}

fn flags() -> impl Strategy<Value = StructuralFlags> {
    prop::collection::vec(any::<bool>(), 8).prop_map(|bits| {
        StructuralFeature::ALL
            .into_iter()
            .zip(bits)
            .filter(|(_, on)| *on)
            .map(|(f, _)| f)
            .collect()
    })
}

proptest! {
    #[test]
    fn prediction_stays_in_unit_cube(
        components in prop::collection::vec(profile(), 0..6),
        flags in flags(),
    ) {
        let out = CompositionPredictor::default().predict(&components, &flags);
        for v in out.as_array() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn prediction_is_deterministic(
        components in prop::collection::vec(profile(), 1..6),
        flags in flags(),
    ) {
        let predictor = CompositionPredictor::default();
        prop_assert_eq!(predictor.predict(&components, &flags), predictor.predict(&components, &flags));
    }

    #[test]
    fn adding_a_flag_never_lowers_love_justice_or_wisdom(
        components in prop::collection::vec(profile(), 1..4),
        flags in flags(),
        extra in 0usize..8,
    ) {
        let predictor = CompositionPredictor::default();
        let feature = StructuralFeature::ALL[extra];
        let before = predictor.predict(&components, &flags);
        let after = predictor.predict(&components, &flags.with(feature));
        prop_assert!(after.love() >= before.love());
        prop_assert!(after.justice() >= before.justice());
        prop_assert!(after.wisdom() >= before.wisdom());
    }

    #[test]
    fn anchor_couplings_of_one_leave_a_single_component_unchanged(c in profile()) {
        let mut params = CouplingParameters::theoretical();
        params.kappa_lj = 1.0;
        params.kappa_lp = 1.0;
        params.kappa_jl = 1.0;
        params.kappa_wl = 1.0;
        let out = CompositionPredictor::new(params).predict(&[c], &StructuralFlags::none());
        prop_assert_eq!(out, c);
    }
}

#[test]
fn empty_component_list_is_zero_regardless_of_flags() {
    let all: StructuralFlags = StructuralFeature::ALL.into_iter().collect();
    assert_eq!(
        CompositionPredictor::default().predict(&[], &all),
        LjpwProfile::zero()
    );
}

#[test]
fn secure_add_fixture() {
    let flags = StructuralFlags::from_pairs([("has_validation", true), ("has_logging", true)]);
    let out = CompositionPredictor::default().predict(&[LjpwProfile::new(1.0, 0.0, 0.0, 0.0)], &flags);
    let expected = [1.0, 0.10, 0.0, 0.0];
    for (got, want) in out.as_array().iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{out}");
    }
}

#[test]
fn unknown_flag_keys_are_ignored() {
    let flags = StructuralFlags::from_pairs([
        ("has_validation", true),
        ("has_quantum_entanglement", true),
        ("has_logging", true),
        ("has_telepathy", true),
    ]);
    assert_eq!(flags.count(), 2);
    let with_noise = CompositionPredictor::default().predict(&[LjpwProfile::neutral()], &flags);
    let clean = StructuralFlags::none()
        .with(StructuralFeature::Validation)
        .with(StructuralFeature::Logging);
    assert_eq!(
        with_noise,
        CompositionPredictor::default().predict(&[LjpwProfile::neutral()], &clean)
    );
}

#[test]
fn harmony_bonus_adds_a_twentieth_per_flag_from_the_third() {
    // Small components keep every stage below the clamp.
    let components = [LjpwProfile::new(0.1, 0.1, 0.1, 0.1)];
    let with_harmony = CompositionPredictor::default();
    let without_harmony = CompositionPredictor::default().with_harmony_rule(HarmonyRule {
        threshold: usize::MAX,
        per_feature: 0.0,
    });

    let ladder = [
        StructuralFlags::none()
            .with(StructuralFeature::TypeHints)
            .with(StructuralFeature::ErrorHandling),
        StructuralFlags::none()
            .with(StructuralFeature::TypeHints)
            .with(StructuralFeature::ErrorHandling)
            .with(StructuralFeature::Validation),
        StructuralFlags::none()
            .with(StructuralFeature::TypeHints)
            .with(StructuralFeature::ErrorHandling)
            .with(StructuralFeature::Validation)
            .with(StructuralFeature::Logging),
    ];

    for (flags, k) in ladder.iter().zip(2usize..) {
        assert_eq!(flags.count(), k);
        let full = with_harmony.predict(&components, flags);
        let topology_only = without_harmony.predict(&components, flags);
        let expected = 0.05 * (k as f64 - 2.0);
        assert!((full.love() - topology_only.love() - expected).abs() < 1e-9, "k={k}");
        assert!((full.justice() - topology_only.justice() - expected).abs() < 1e-9, "k={k}");
        assert!((full.wisdom() - topology_only.wisdom() - expected).abs() < 1e-9, "k={k}");
        assert_eq!(full.power(), topology_only.power(), "k={k}");
    }

    for pair in ladder.windows(2) {
        let (lower, higher) = (&pair[0], &pair[1]);
        let step = |p: &CompositionPredictor| {
            let a = p.predict(&components, lower).as_array();
            let b = p.predict(&components, higher).as_array();
            [b[0] - a[0], b[1] - a[1], b[2] - a[2], b[3] - a[3]]
        };
        let full = step(&with_harmony);
        let topology = step(&without_harmony);
        for axis in [0, 1, 3] {
            assert!((full[axis] - topology[axis] - 0.05).abs() < 1e-9);
            assert!(full[axis] > 0.0);
        }
        assert!((full[2] - topology[2]).abs() < 1e-12);
    }
}
