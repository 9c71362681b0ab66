//! Whole-system summary over many entities.

use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use ljpw_core::types::{Axis, LjpwProfile};

use super::archetype::{match_archetype, Archetype};
use super::entity::{density, harmony, mass, Entity};
use super::interaction::{friction, resonance};

/// Resonance at or above which two entities share a cluster.
pub const RESONANCE_CLUSTER_THRESHOLD: f64 = 0.85;
/// Friction at or above which a pair is a hotspot.
pub const FRICTION_HOTSPOT_THRESHOLD: f64 = 0.5;
pub const MAX_HOTSPOTS: usize = 10;
pub const DEFAULT_GRAVITATIONAL_CENTRES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrictionHotspot {
    pub a: String,
    pub b: String,
    pub friction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravitationalCentre {
    pub name: String,
    pub mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    pub entities: usize,
    pub mean_profile: LjpwProfile,
    /// Harmony of the mean profile.
    pub harmony: f64,
    pub entropy: f64,
    pub total_mass: f64,
    pub mean_density: f64,
    pub dominant_archetype: Option<Archetype>,
    pub archetype_distribution: BTreeMap<String, usize>,
    pub resonance_clusters: Vec<Vec<String>>,
    pub friction_hotspots: Vec<FrictionHotspot>,
    pub gravitational_centres: Vec<GravitationalCentre>,
}

impl SystemSummary {
    pub fn of(entities: &[Entity]) -> Self {
        Self::with_centres(entities, DEFAULT_GRAVITATIONAL_CENTRES)
    }

    pub fn with_centres(entities: &[Entity], top_n: usize) -> Self {
        let mean_profile = mean_profile(entities);
        let masses: Vec<f64> = entities.iter().map(mass).collect();
        let total_mass = masses.iter().fold(0.0, |acc, m| acc + m);
        let mean_density = if entities.is_empty() {
            0.0
        } else {
            entities.iter().fold(0.0, |acc, e| acc + density(e)) / entities.len() as f64
        };

        let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut counts: Vec<(Archetype, usize)> = Vec::new();
        for entity in entities {
            let archetype = match_archetype(&entity.profile).archetype;
            *distribution.entry(archetype.name().to_string()).or_insert(0) += 1;
            match counts.iter_mut().find(|(a, _)| *a == archetype) {
                Some((_, n)) => *n += 1,
                None => counts.push((archetype, 1)),
            }
        }
        // First-seen archetype wins ties.
        let dominant_archetype = counts
            .iter()
            .fold(None::<(Archetype, usize)>, |best, &(a, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((a, n)),
            })
            .map(|(a, _)| a);

        Self {
            entities: entities.len(),
            mean_profile,
            harmony: harmony(&mean_profile),
            entropy: entropy(entities),
            total_mass,
            mean_density,
            dominant_archetype,
            archetype_distribution: distribution,
            resonance_clusters: resonance_clusters(entities, RESONANCE_CLUSTER_THRESHOLD),
            friction_hotspots: friction_hotspots(entities, FRICTION_HOTSPOT_THRESHOLD),
            gravitational_centres: gravitational_centres(entities, top_n),
        }
    }
}

/// Per-axis mean; zero for no entities.
pub fn mean_profile(entities: &[Entity]) -> LjpwProfile {
    if entities.is_empty() {
        return LjpwProfile::zero();
    }
    let n = entities.len() as f64;
    let mut sums = [0.0; 4];
    for entity in entities {
        for (sum, v) in sums.iter_mut().zip(entity.profile.as_array()) {
            *sum += v;
        }
    }
    LjpwProfile::from_array(sums.map(|s| s / n))
}

/// `min(1, 4 × mean per-axis population variance)`. Maximal (1) for no
/// entities.
pub fn entropy(entities: &[Entity]) -> f64 {
    if entities.is_empty() {
        return 1.0;
    }
    let total = Axis::ALL.iter().fold(0.0, |acc, &axis| {
        let values: Vec<f64> = entities.iter().map(|e| e.profile.get(axis)).collect();
        acc + values.iter().population_variance()
    });
    let mean_variance = total / 4.0;
    (4.0 * mean_variance).min(1.0)
}

/// Greedy clusters: each unclaimed entity, in order, claims every other
/// unclaimed entity resonating with it at `threshold` or above. Singletons
/// are dropped.
pub fn resonance_clusters(entities: &[Entity], threshold: f64) -> Vec<Vec<String>> {
    let mut claimed = vec![false; entities.len()];
    let mut clusters = Vec::new();
    for (i, seed) in entities.iter().enumerate() {
        if claimed[i] {
            continue;
        }
        claimed[i] = true;
        let mut cluster = vec![seed.name.clone()];
        for (j, other) in entities.iter().enumerate() {
            if !claimed[j] && resonance(&seed.profile, &other.profile) >= threshold {
                claimed[j] = true;
                cluster.push(other.name.clone());
            }
        }
        if cluster.len() > 1 {
            clusters.push(cluster);
        }
    }
    clusters
}

/// Pairs with friction at or above `threshold`, highest first, at most
/// [`MAX_HOTSPOTS`].
pub fn friction_hotspots(entities: &[Entity], threshold: f64) -> Vec<FrictionHotspot> {
    let mut hotspots = Vec::new();
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            let f = friction(&a.profile, &b.profile);
            if f >= threshold {
                hotspots.push(FrictionHotspot {
                    a: a.name.clone(),
                    b: b.name.clone(),
                    friction: f,
                });
            }
        }
    }
    hotspots.sort_by(|x, y| y.friction.total_cmp(&x.friction));
    hotspots.truncate(MAX_HOTSPOTS);
    hotspots
}

/// The `top_n` heaviest entities, heaviest first.
pub fn gravitational_centres(entities: &[Entity], top_n: usize) -> Vec<GravitationalCentre> {
    let mut centres: Vec<GravitationalCentre> = entities
        .iter()
        .map(|e| GravitationalCentre {
            name: e.name.clone(),
            mass: mass(e),
        })
        .collect();
    centres.sort_by(|x, y| y.mass.total_cmp(&x.mass));
    centres.truncate(top_n);
    centres
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, l: f64, j: f64, p: f64, w: f64) -> Entity {
        Entity::new(name, LjpwProfile::new(l, j, p, w))
    }

    #[test]
    fn test_empty_system() {
        let summary = SystemSummary::of(&[]);
        assert_eq!(summary.entropy, 1.0);
        assert_eq!(summary.total_mass, 0.0);
        assert_eq!(summary.dominant_archetype, None);
        assert!(summary.resonance_clusters.is_empty());
    }

    #[test]
    fn test_entropy_of_identical_entities_is_zero() {
        let same = vec![entity("a", 0.4, 0.5, 0.6, 0.7), entity("b", 0.4, 0.5, 0.6, 0.7)];
        assert!(entropy(&same).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_of_opposite_corners() {
        // Every axis has variance 0.25, so 4 × 0.25 saturates at 1.
        let corners = vec![entity("lo", 0.0, 0.0, 0.0, 0.0), entity("hi", 1.0, 1.0, 1.0, 1.0)];
        assert_eq!(entropy(&corners), 1.0);
        let near = vec![entity("a", 0.4, 0.4, 0.4, 0.4), entity("b", 0.6, 0.6, 0.6, 0.6)];
        assert!((entropy(&near) - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_resonance_clusters_and_hotspots() {
        let entities = vec![
            entity("api", 0.8, 0.5, 0.7, 0.5),
            entity("gateway", 0.82, 0.5, 0.68, 0.5),
            entity("firewall", 0.0, 1.0, 0.2, 0.6),
        ];
        let clusters = resonance_clusters(&entities, RESONANCE_CLUSTER_THRESHOLD);
        assert_eq!(clusters, vec![vec!["api".to_string(), "gateway".to_string()]]);

        let hotspots = friction_hotspots(&entities, FRICTION_HOTSPOT_THRESHOLD);
        assert_eq!(hotspots.len(), 2);
        assert!(hotspots[0].friction >= hotspots[1].friction);
        assert!(hotspots.iter().all(|h| h.a == "firewall" || h.b == "firewall"));
    }

    #[test]
    fn test_gravitational_centres_are_sorted_by_mass() {
        let entities = vec![
            entity("small", 0.5, 0.5, 0.9, 0.5).with_concepts(2),
            entity("large", 0.5, 0.5, 0.9, 0.5).with_concepts(20),
            entity("medium", 0.5, 0.5, 0.9, 0.5).with_concepts(8),
        ];
        let centres = gravitational_centres(&entities, 2);
        let names: Vec<&str> = centres.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["large", "medium"]);
    }
}
