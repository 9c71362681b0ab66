//! Archetype matching against fixed per-axis signature ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use ljpw_core::types::{Axis, LjpwProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    PublicGateway,
    SecuritySentinel,
    DataVault,
    MonitoringHub,
    ApiEndpoint,
    Validator,
    Transformer,
    Logger,
    BalancedSystem,
    ChaoticSystem,
    Fortress,
}

impl Archetype {
    /// Declaration order; ties in [`match_archetype`] go to the earlier one.
    pub const ALL: [Archetype; 11] = [
        Self::PublicGateway,
        Self::SecuritySentinel,
        Self::DataVault,
        Self::MonitoringHub,
        Self::ApiEndpoint,
        Self::Validator,
        Self::Transformer,
        Self::Logger,
        Self::BalancedSystem,
        Self::ChaoticSystem,
        Self::Fortress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PublicGateway => "public_gateway",
            Self::SecuritySentinel => "security_sentinel",
            Self::DataVault => "data_vault",
            Self::MonitoringHub => "monitoring_hub",
            Self::ApiEndpoint => "api_endpoint",
            Self::Validator => "validator",
            Self::Transformer => "transformer",
            Self::Logger => "logger",
            Self::BalancedSystem => "balanced_system",
            Self::ChaoticSystem => "chaotic_system",
            Self::Fortress => "fortress",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PublicGateway => "Open and welcoming with reasonable security, like a web server or API gateway.",
            Self::SecuritySentinel => "Strict and defensive, like a firewall or authentication service.",
            Self::DataVault => "Powerful structured storage, like a database or cache.",
            Self::MonitoringHub => "Observant and watchful, like a log aggregator or metrics stack.",
            Self::ApiEndpoint => "Open and powerful, serving many callers efficiently.",
            Self::Validator => "Enforces correctness and compliance with rules.",
            Self::Transformer => "Processes and reshapes data efficiently.",
            Self::Logger => "Records and illuminates system behaviour.",
            Self::BalancedSystem => "Well rounded across every axis.",
            Self::ChaoticSystem => "No clear purpose or structure.",
            Self::Fortress => "Maximum security, minimal accessibility.",
        }
    }

    /// `[low, high]` per axis, in L, J, P, W order.
    pub fn signature(&self) -> [(f64, f64); 4] {
        match self {
            Self::PublicGateway => [(0.7, 1.0), (0.4, 0.7), (0.5, 0.8), (0.4, 0.7)],
            Self::SecuritySentinel => [(0.1, 0.4), (0.8, 1.0), (0.3, 0.6), (0.5, 0.8)],
            Self::DataVault => [(0.3, 0.6), (0.5, 0.8), (0.7, 1.0), (0.4, 0.7)],
            Self::MonitoringHub => [(0.5, 0.8), (0.4, 0.7), (0.4, 0.7), (0.8, 1.0)],
            Self::ApiEndpoint => [(0.7, 1.0), (0.4, 0.7), (0.7, 1.0), (0.4, 0.7)],
            Self::Validator => [(0.3, 0.6), (0.8, 1.0), (0.3, 0.6), (0.5, 0.8)],
            Self::Transformer => [(0.4, 0.7), (0.4, 0.7), (0.7, 1.0), (0.5, 0.8)],
            Self::Logger => [(0.5, 0.8), (0.3, 0.6), (0.3, 0.6), (0.8, 1.0)],
            Self::BalancedSystem => [(0.5, 0.8), (0.5, 0.8), (0.5, 0.8), (0.5, 0.8)],
            Self::ChaoticSystem => [(0.0, 1.0), (0.0, 1.0), (0.0, 1.0), (0.0, 1.0)],
            Self::Fortress => [(0.0, 0.3), (0.9, 1.0), (0.4, 0.7), (0.5, 0.8)],
        }
    }

    /// Fit of `profile` to this archetype, in [0, 1].
    pub fn score(&self, profile: &LjpwProfile) -> f64 {
        let signature = self.signature();
        let total_width = signature.iter().fold(0.0, |acc, (low, high)| acc + (high - low));
        let specificity = 1.0 - total_width / 4.0;
        let fit = Axis::ALL
            .iter()
            .zip(signature.iter())
            .fold(0.0, |acc, (&axis, &(low, high))| {
                acc + axis_fit(profile.get(axis), low, high)
            })
            / 4.0;
        (fit * (0.7 + 0.3 * specificity)).clamp(0.0, 1.0)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 0.5..=1 inside the range, decaying linearly to 0 outside it.
fn axis_fit(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        (1.0 - (low - value) / low.max(0.1)).max(0.0)
    } else if value > high {
        (1.0 - (value - high) / (1.0 - high).max(0.1)).max(0.0)
    } else {
        let half_width = (high - low) / 2.0;
        if half_width > 0.0 {
            let centre = (low + high) / 2.0;
            1.0 - 0.5 * (value - centre).abs() / half_width
        } else {
            1.0
        }
    }
}

/// Best-matching archetype with its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArchetypeMatch {
    pub archetype: Archetype,
    pub confidence: f64,
}

/// Highest-scoring archetype. Only a strictly greater score displaces the
/// current best.
pub fn match_archetype(profile: &LjpwProfile) -> ArchetypeMatch {
    let mut best = ArchetypeMatch {
        archetype: Archetype::ALL[0],
        confidence: Archetype::ALL[0].score(profile),
    };
    for archetype in Archetype::ALL.into_iter().skip(1) {
        let confidence = archetype.score(profile);
        if confidence > best.confidence {
            best = ArchetypeMatch {
                archetype,
                confidence,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_centres_match_themselves() {
        for archetype in [
            Archetype::SecuritySentinel,
            Archetype::DataVault,
            Archetype::Logger,
            Archetype::Fortress,
        ] {
            let c = archetype.signature().map(|(low, high)| (low + high) / 2.0);
            let profile = LjpwProfile::from_array(c);
            assert_eq!(match_archetype(&profile).archetype, archetype, "{archetype}");
        }
    }

    #[test]
    fn test_axis_fit_edges() {
        assert_eq!(axis_fit(0.5, 0.4, 0.6), 1.0);
        assert!((axis_fit(0.6, 0.4, 0.6) - 0.5).abs() < 1e-12);
        assert_eq!(axis_fit(0.5, 0.5, 0.5), 1.0);
        // Lower bounds under 0.1 use 0.1 as the scale.
        assert!((axis_fit(0.0, 0.05, 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(axis_fit(0.0, 0.9, 1.0), 0.0);
    }

    #[test]
    fn test_chaotic_system_has_lowest_specificity_weight() {
        // Width 4 gives specificity 0, so the score tops out at 0.7.
        let centre = LjpwProfile::new(0.5, 0.5, 0.5, 0.5);
        assert!((Archetype::ChaoticSystem.score(&centre) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_is_a_probability() {
        for profile in [
            LjpwProfile::zero(),
            LjpwProfile::ANCHOR,
            LjpwProfile::neutral(),
            LjpwProfile::NATURAL_EQUILIBRIUM,
            LjpwProfile::new(0.0, 1.0, 0.0, 1.0),
        ] {
            let m = match_archetype(&profile);
            assert!((0.0..=1.0).contains(&m.confidence));
        }
    }
}
