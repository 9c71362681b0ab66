//! Full diagnostic record for one entity.

use serde::Serialize;

use ljpw_core::types::{Axis, LjpwProfile};

use super::archetype::{match_archetype, Archetype};
use super::entity::{clarity, density, harmony, influence, mass, Entity};
use super::secondary::SecondaryMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimaryMetrics {
    pub harmony: f64,
    pub clarity: f64,
    pub mass: f64,
    pub density: f64,
    pub influence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeReport {
    pub archetype: Archetype,
    pub confidence: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub name: String,
    pub profile: LjpwProfile,
    pub primary: PrimaryMetrics,
    pub archetype: ArchetypeReport,
    pub secondary: SecondaryMetrics,
    pub dominant_axis: Axis,
    pub volume: f64,
}

impl Diagnostic {
    pub fn of(entity: &Entity) -> Self {
        let matched = match_archetype(&entity.profile);
        Self {
            name: entity.name.clone(),
            profile: entity.profile,
            primary: PrimaryMetrics {
                harmony: harmony(&entity.profile),
                clarity: clarity(entity),
                mass: mass(entity),
                density: density(entity),
                influence: influence(entity),
            },
            archetype: ArchetypeReport {
                archetype: matched.archetype,
                confidence: matched.confidence,
                description: matched.archetype.description(),
            },
            secondary: SecondaryMetrics::of(&entity.profile),
            dominant_axis: entity.profile.dominant_axis(),
            volume: entity.profile.volume(),
        }
    }
}
