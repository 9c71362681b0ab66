//! Which axes each structural bonus feeds, and in what share.

use serde::{Deserialize, Serialize};

use ljpw_core::types::{Axis, StructuralFeature};

/// One edge of the topology: `feature` adds `share × bonus(feature)` to `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub feature: StructuralFeature,
    pub axis: Axis,
    pub share: f64,
}

/// Flag to axis routing for structural bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTopology {
    targets: Vec<BonusTarget>,
}

impl BonusTopology {
    pub fn new(targets: Vec<BonusTarget>) -> Self {
        Self { targets }
    }

    /// The reference routing.
    pub fn reference() -> Self {
        use Axis::{Justice, Love, Wisdom};
        use StructuralFeature::*;

        let t = |feature: StructuralFeature, axis: Axis, share: f64| BonusTarget {
            feature,
            axis,
            share,
        };
        Self::new(vec![
            t(Docstring, Love, 1.0),
            t(Docstring, Wisdom, 0.5),
            t(TypeHints, Wisdom, 1.0),
            t(ErrorHandling, Justice, 1.0),
            t(Logging, Love, 1.0),
            t(Testing, Justice, 1.0),
            t(State, Wisdom, 1.0),
            t(State, Justice, 0.5),
            t(History, Love, 1.0),
            t(History, Wisdom, 0.3),
            t(Validation, Justice, 1.0),
        ])
    }

    pub fn targets(&self) -> &[BonusTarget] {
        &self.targets
    }

    /// Edges leaving one feature.
    pub fn targets_of(&self, feature: StructuralFeature) -> impl Iterator<Item = &BonusTarget> {
        self.targets.iter().filter(move |t| t.feature == feature)
    }
}

impl Default for BonusTopology {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_covers_every_feature() {
        let topology = BonusTopology::reference();
        for feature in StructuralFeature::ALL {
            assert!(topology.targets_of(feature).count() >= 1, "{feature} unrouted");
        }
        assert_eq!(topology.targets().len(), 11);
    }

    #[test]
    fn test_state_feeds_wisdom_and_half_justice() {
        let topology = BonusTopology::reference();
        let edges: Vec<_> = topology
            .targets_of(StructuralFeature::State)
            .map(|t| (t.axis, t.share))
            .collect();
        assert_eq!(edges, vec![(Axis::Wisdom, 1.0), (Axis::Justice, 0.5)]);
    }
}
