//! Property tests for profiles, flags and parameters.

use ljpw_core::types::{
    Axis, CouplingParameters, LjpwProfile, ParameterBounds, StructuralFeature, StructuralFlags,
};
use proptest::prelude::*;

fn any_axis_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -10.0f64..10.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn prop_every_axis_is_clamped(
        l in any_axis_value(),
        j in any_axis_value(),
        p in any_axis_value(),
        w in any_axis_value(),
    ) {
        let profile = LjpwProfile::new(l, j, p, w);
        for axis in Axis::ALL {
            let v = profile.get(axis);
            prop_assert!((0.0..=1.0).contains(&v), "{axis} = {v}");
        }
    }

    #[test]
    fn prop_distance_is_symmetric_and_non_negative(
        a in prop::array::uniform4(0.0f64..1.0),
        b in prop::array::uniform4(0.0f64..1.0),
    ) {
        let a = LjpwProfile::from_array(a);
        let b = LjpwProfile::from_array(b);
        let ab = a.distance_to(&b);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - b.distance_to(&a)).abs() < 1e-12);
        prop_assert!(a.distance_to(&a) == 0.0);
    }

    #[test]
    fn prop_dominant_axis_holds_the_maximum(v in prop::array::uniform4(0.0f64..1.0)) {
        let profile = LjpwProfile::from_array(v);
        let dominant = profile.get(profile.dominant_axis());
        for axis in Axis::ALL {
            prop_assert!(dominant >= profile.get(axis));
        }
    }

    #[test]
    fn prop_projection_lands_inside_bounds(v in prop::array::uniform12(-5.0f64..5.0)) {
        let bounds = ParameterBounds::default();
        let projected = CouplingParameters::from_vector(&bounds.project(&v));
        prop_assert!(bounds.contains(&projected));
    }

    #[test]
    fn prop_flag_count_matches_features(mask in prop::array::uniform8(any::<bool>())) {
        let flags: StructuralFlags = StructuralFeature::ALL
            .into_iter()
            .zip(mask)
            .filter(|(_, on)| *on)
            .map(|(f, _)| f)
            .collect();
        prop_assert_eq!(flags.count(), mask.iter().filter(|m| **m).count());
    }
}

#[test]
fn test_parameters_file_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let params = CouplingParameters::from_vector(&[
        1.1, 1.0, 0.9, 1.4, 0.0, 0.2, 0.1, 0.05, 0.3, 0.12, 0.2, 0.01,
    ]);

    for file in ["params.toml", "params.json"] {
        let path = dir.path().join(file);
        params.save(&path).unwrap();
        assert_eq!(CouplingParameters::load(&path).unwrap(), params);
    }
}

#[test]
fn test_parameters_load_missing_file() {
    let err = CouplingParameters::load(std::path::Path::new("/nonexistent/params.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}
