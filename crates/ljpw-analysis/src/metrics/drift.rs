//! Movement of one entity through profile space over time.

use serde::Serialize;

use ljpw_core::types::{Axis, LjpwProfile};

use super::entity::Entity;

/// Per-axis change at or beyond which the drift is called out.
const AXIS_SHIFT_THRESHOLD: f64 = 0.1;
/// Velocity above which the drift is flagged as unstable.
const HIGH_VELOCITY: f64 = 0.5;
const MIN_TIME_DELTA: f64 = 0.001;

/// Change between two observations, in L, J, P, W order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticDrift {
    pub deltas: [f64; 4],
    pub time_delta: f64,
}

impl SemanticDrift {
    /// Drift from `before` to `after`. The time delta is the timestamp
    /// difference floored at 0.001, or 1 when either timestamp is missing.
    pub fn between(before: &Entity, after: &Entity) -> Self {
        let time_delta = match (before.timestamp, after.timestamp) {
            (Some(t0), Some(t1)) => (t1 - t0).max(MIN_TIME_DELTA),
            _ => 1.0,
        };
        Self::from_profiles(&before.profile, &after.profile, time_delta)
    }

    pub fn from_profiles(before: &LjpwProfile, after: &LjpwProfile, time_delta: f64) -> Self {
        let (b, a) = (before.as_array(), after.as_array());
        Self {
            deltas: [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]],
            time_delta,
        }
    }

    pub fn delta(&self, axis: Axis) -> f64 {
        self.deltas[axis.index()]
    }

    pub fn magnitude(&self) -> f64 {
        self.deltas.iter().fold(0.0, |acc, d| acc + d * d).sqrt()
    }

    pub fn velocity(&self) -> f64 {
        if self.time_delta <= 0.0 {
            0.0
        } else {
            self.magnitude() / self.time_delta
        }
    }

    /// Unit direction vector; all zeros when nothing moved.
    pub fn direction(&self) -> [f64; 4] {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            [0.0; 4]
        } else {
            self.deltas.map(|d| d / magnitude)
        }
    }

    /// Linear extrapolation `time_forward` units past `current`.
    pub fn predict(&self, current: &LjpwProfile, time_forward: f64) -> LjpwProfile {
        let factor = if self.time_delta > 0.0 {
            time_forward / self.time_delta
        } else {
            0.0
        };
        let mut next = current.as_array();
        for (value, delta) in next.iter_mut().zip(self.deltas) {
            *value += delta * factor;
        }
        LjpwProfile::from_array(next)
    }

    /// Human-readable reading of the per-axis shifts and velocity.
    pub fn interpretation(&self) -> String {
        let readings: [(Axis, &str, &str); 4] = [
            (Axis::Love, "opening up", "closing down"),
            (Axis::Justice, "hardening", "structure decaying"),
            (Axis::Power, "gaining capacity", "losing capacity"),
            (Axis::Wisdom, "gaining observability", "losing insight"),
        ];
        let mut notes: Vec<&str> = readings
            .iter()
            .filter_map(|&(axis, rising, falling)| {
                let delta = self.delta(axis);
                if delta > AXIS_SHIFT_THRESHOLD {
                    Some(rising)
                } else if delta < -AXIS_SHIFT_THRESHOLD {
                    Some(falling)
                } else {
                    None
                }
            })
            .collect();
        if self.velocity() > HIGH_VELOCITY {
            notes.push("high velocity");
        }
        if notes.is_empty() {
            "stable".to_string()
        } else {
            notes.join("; ")
        }
    }
}
