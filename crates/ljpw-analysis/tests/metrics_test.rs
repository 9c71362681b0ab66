//! Derived metric properties.

use proptest::prelude::*;

use ljpw_analysis::metrics::{
    friction, harmony, match_archetype, resonance, Diagnostic, Entity, SystemSummary,
};
use ljpw_core::types::LjpwProfile;

fn profile() -> impl Strategy<Value = LjpwProfile> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0)
        .prop_map(|(l, j, p, w)| LjpwProfile::new(l, j, p, w))
}

proptest! {
    #[test]
    fn harmony_is_bounded(v in profile()) {
        let h = harmony(&v);
        prop_assert!(h > 0.0 && h <= 1.0);
        if v == LjpwProfile::ANCHOR {
            prop_assert_eq!(h, 1.0);
        }
    }

    #[test]
    fn archetype_confidence_is_bounded(v in profile()) {
        let m = match_archetype(&v);
        prop_assert!((0.0..=1.0).contains(&m.confidence));
    }

    #[test]
    fn self_interaction(v in profile()) {
        prop_assert_eq!(friction(&v, &v), 0.0);
        prop_assert!(resonance(&v, &v) >= 0.99);
    }

    #[test]
    fn friction_and_resonance_are_symmetric(a in profile(), b in profile()) {
        prop_assert!((friction(&a, &b) - friction(&b, &a)).abs() < 1e-12);
        prop_assert!((resonance(&a, &b) - resonance(&b, &a)).abs() < 1e-12);
    }
}

#[test]
fn harmony_round_trips_through_distance() {
    let v = LjpwProfile::new(0.9, 0.667, 0.873, 0.795);
    let d = v.distance_to(&LjpwProfile::ANCHOR);
    assert_eq!(harmony(&v), 1.0 / (1.0 + d));
}

#[test]
fn distance_is_symmetric() {
    let a = LjpwProfile::new(0.1, 0.9, 0.4, 0.2);
    let b = LjpwProfile::new(0.7, 0.3, 0.8, 0.6);
    assert_eq!(a.distance_to(&b), b.distance_to(&a));
}

#[test]
fn diagnostic_serializes_every_section() {
    let entity = Entity::new("firewall", LjpwProfile::new(0.2, 0.9, 0.4, 0.6))
        .with_concepts(8)
        .with_base_clarity(0.9);
    let json = serde_json::to_value(Diagnostic::of(&entity)).unwrap();
    for key in ["name", "profile", "primary", "archetype", "secondary", "dominant_axis", "volume"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["profile"]["J"], 0.9);
}

#[test]
fn system_summary_over_a_small_estate() {
    let entities = vec![
        Entity::new("web", LjpwProfile::new(0.8, 0.5, 0.7, 0.5)).with_concepts(15),
        Entity::new("firewall", LjpwProfile::new(0.2, 0.9, 0.4, 0.6)).with_concepts(8),
        Entity::new("database", LjpwProfile::new(0.4, 0.6, 0.9, 0.5)).with_concepts(25),
    ];
    let summary = SystemSummary::of(&entities);
    assert_eq!(summary.entities, 3);
    assert_eq!(summary.gravitational_centres[0].name, "database");
    assert_eq!(summary.archetype_distribution.values().sum::<usize>(), 3);
    assert!(summary.dominant_archetype.is_some());
    assert!((0.0..=1.0).contains(&summary.harmony));
}
