//! Multi-scale profiles: entities grouped into clusters grouped into a system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use ljpw_core::types::LjpwProfile;

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractalScale {
    Atomic,
    Entity,
    Cluster,
    System,
    Platform,
}

/// A profile at one scale, with the children it was aggregated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractalProfile {
    pub name: String,
    pub scale: FractalScale,
    pub profile: LjpwProfile,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FractalProfile>,
}

impl FractalProfile {
    pub fn leaf(name: impl Into<String>, scale: FractalScale, profile: LjpwProfile) -> Self {
        Self {
            name: name.into(),
            scale,
            profile,
            children: Vec::new(),
        }
    }

    /// Parent at `scale` whose profile is the equal-weight mean of `children`.
    pub fn aggregate(name: impl Into<String>, scale: FractalScale, children: Vec<FractalProfile>) -> Self {
        let profile = aggregate_profiles(&children, None);
        Self {
            name: name.into(),
            scale,
            profile,
            children,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FractalProfile::node_count).sum::<usize>()
    }
}

/// Weighted mean of the children's profiles. `weights` defaults to equal
/// weights and is matched to children by position; missing weights count
/// as 0. No children, or a total weight of 0, gives the natural
/// equilibrium.
pub fn aggregate_profiles(children: &[FractalProfile], weights: Option<&[f64]>) -> LjpwProfile {
    let weight_of = |i: usize| match weights {
        Some(w) => w.get(i).copied().unwrap_or(0.0),
        None => 1.0,
    };
    let total = (0..children.len()).fold(0.0, |acc, i| acc + weight_of(i));
    if children.is_empty() || total == 0.0 {
        return LjpwProfile::NATURAL_EQUILIBRIUM;
    }

    let mut sums = [0.0; 4];
    for (i, child) in children.iter().enumerate() {
        let w = weight_of(i);
        for (sum, v) in sums.iter_mut().zip(child.profile.as_array()) {
            *sum += v * w;
        }
    }
    LjpwProfile::from_array(sums.map(|s| s / total))
}

/// Two-level tree: atomic entities grouped into clusters under one system
/// root. Unknown member names are skipped, and groups with no known member
/// are left out.
pub fn build_fractal_tree(
    entities: &[Entity],
    groupings: &BTreeMap<String, Vec<String>>,
    root_name: &str,
) -> FractalProfile {
    let clusters: Vec<FractalProfile> = groupings
        .iter()
        .filter_map(|(group, members)| {
            let leaves: Vec<FractalProfile> = members
                .iter()
                .filter_map(|member| entities.iter().find(|e| &e.name == member))
                .map(|e| FractalProfile::leaf(e.name.clone(), FractalScale::Atomic, e.profile))
                .collect();
            (!leaves.is_empty())
                .then(|| FractalProfile::aggregate(group.clone(), FractalScale::Cluster, leaves))
        })
        .collect();
    FractalProfile::aggregate(root_name, FractalScale::System, clusters)
}
