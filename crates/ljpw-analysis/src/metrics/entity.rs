//! Single-entity metrics: harmony, clarity, mass, density and influence.

use serde::{Deserialize, Serialize};

use ljpw_core::constants::DISTANCE_EPSILON;
use ljpw_core::types::LjpwProfile;

/// Base clarity for entities built without one.
pub const DEFAULT_BASE_CLARITY: f64 = 0.5;

/// A named profile with the context the mass metrics need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub profile: LjpwProfile,
    /// Number of concepts (definitions) the entity carries. At least 1.
    #[serde(default = "default_concept_count")]
    pub concept_count: usize,
    /// Clarity before adjusting for axis dominance, in [0, 1].
    #[serde(default = "default_base_clarity")]
    pub base_clarity: f64,
    /// Observation time, used by drift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

fn default_concept_count() -> usize {
    1
}

fn default_base_clarity() -> f64 {
    DEFAULT_BASE_CLARITY
}

impl Entity {
    pub fn new(name: impl Into<String>, profile: LjpwProfile) -> Self {
        Self {
            name: name.into(),
            profile,
            concept_count: 1,
            base_clarity: DEFAULT_BASE_CLARITY,
            timestamp: None,
        }
    }

    pub fn with_concepts(mut self, concept_count: usize) -> Self {
        self.concept_count = concept_count.max(1);
        self
    }

    pub fn with_base_clarity(mut self, clarity: f64) -> Self {
        self.base_clarity = if clarity.is_nan() { 0.0 } else { clarity.clamp(0.0, 1.0) };
        self
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// `1 / (1 + distance(profile, ANCHOR))`. 1 only at the anchor.
pub fn harmony(profile: &LjpwProfile) -> f64 {
    harmony_with_anchor(profile, &LjpwProfile::ANCHOR)
}

pub fn harmony_with_anchor(profile: &LjpwProfile, anchor: &LjpwProfile) -> f64 {
    1.0 / (1.0 + profile.distance_to(anchor))
}

/// Base clarity scaled by how strongly the primary axis dominates.
pub fn clarity(entity: &Entity) -> f64 {
    let values = entity.profile.as_array();
    let max = values.iter().fold(f64::MIN, |acc, v| acc.max(*v));
    let mean = entity.profile.volume();
    let dominance = if mean > 0.0 { max / mean } else { 1.0 };
    (entity.base_clarity * (0.5 + 0.5 * (dominance - 1.0))).clamp(0.0, 1.0)
}

/// `(concepts × clarity) × (1 + harmony)`.
pub fn mass(entity: &Entity) -> f64 {
    entity.concept_count as f64 * clarity(entity) * (1.0 + harmony(&entity.profile))
}

/// Mass per unit volume, with volume floored at 0.01.
pub fn density(entity: &Entity) -> f64 {
    mass(entity) / entity.profile.volume().max(DISTANCE_EPSILON)
}

pub fn influence(entity: &Entity) -> f64 {
    mass(entity) * clarity(entity)
}
