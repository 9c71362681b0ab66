//! Pairwise metrics between entities.

use ljpw_core::constants::DISTANCE_EPSILON;
use ljpw_core::types::{Axis, LjpwProfile};

use super::entity::{mass, Entity};

/// Weight applied to L and J opposition in [`friction`].
const LOVE_JUSTICE_FRICTION_WEIGHT: f64 = 1.2;

/// `G · m_a · m_b / r²` with `G = 1`.
pub fn gravity(a: &Entity, b: &Entity) -> f64 {
    gravity_with_constant(a, b, 1.0)
}

/// Gravity with an explicit constant. The distance is floored at 0.01 so
/// coincident entities stay finite.
pub fn gravity_with_constant(a: &Entity, b: &Entity, g: f64) -> f64 {
    let r = a.profile.distance_to(&b.profile).max(DISTANCE_EPSILON);
    g * mass(a) * mass(b) / (r * r)
}

/// Mean per-axis opposition in [0, 1]; L and J count 1.2×.
pub fn friction(a: &LjpwProfile, b: &LjpwProfile) -> f64 {
    let total = Axis::ALL.iter().fold(0.0, |acc, &axis| {
        let opposition = (a.get(axis) - b.get(axis)).abs();
        let weight = match axis {
            Axis::Love | Axis::Justice => LOVE_JUSTICE_FRICTION_WEIGHT,
            Axis::Power | Axis::Wisdom => 1.0,
        };
        acc + opposition * weight
    });
    (total / 4.0).min(1.0)
}

/// 0.3 for a shared dominant axis plus 0.7 × mean per-axis similarity.
pub fn resonance(a: &LjpwProfile, b: &LjpwProfile) -> f64 {
    let dominant = if a.dominant_axis() == b.dominant_axis() {
        0.3
    } else {
        0.0
    };
    let similarity = Axis::ALL
        .iter()
        .fold(0.0, |acc, &axis| acc + 1.0 - (a.get(axis) - b.get(axis)).abs())
        / 4.0;
    (dominant + 0.7 * similarity).clamp(0.0, 1.0)
}
