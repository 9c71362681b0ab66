//! The LJPW profile: a point in the unit 4-cube.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Axis;
use crate::constants::NEUTRAL_AXIS_VALUE;
use crate::errors::ProfileError;

/// A 4-dimensional LJPW profile with every axis clamped to [0.0, 1.0].
///
/// Profiles are plain values: there is no identity beyond the four
/// numbers, and every constructor clamps, so a profile can never hold an
/// out-of-range axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct LjpwProfile {
    values: [f64; 4],
}

impl LjpwProfile {
    /// The ideal reference point (1, 1, 1, 1).
    pub const ANCHOR: LjpwProfile = LjpwProfile {
        values: [1.0, 1.0, 1.0, 1.0],
    };

    /// Achievable balance point: φ⁻¹, √2 − 1, e − 2, ln 2.
    pub const NATURAL_EQUILIBRIUM: LjpwProfile = LjpwProfile {
        values: [0.618034, 0.414214, 0.718282, 0.693147],
    };

    /// Create a profile, clamping each axis to [0.0, 1.0].
    ///
    /// NaN is mapped to 0.0 so the clamping invariant holds for every
    /// input. Use [`LjpwProfile::try_new`] where NaN must be rejected.
    pub fn new(love: f64, justice: f64, power: f64, wisdom: f64) -> Self {
        Self::from_array([love, justice, power, wisdom])
    }

    /// Create a profile, rejecting non-numeric axis values.
    pub fn try_new(love: f64, justice: f64, power: f64, wisdom: f64) -> Result<Self, ProfileError> {
        let values = [love, justice, power, wisdom];
        for axis in Axis::ALL {
            if values[axis.index()].is_nan() {
                return Err(ProfileError::NonNumericAxis {
                    axis: axis.symbol(),
                });
            }
        }
        Ok(Self::from_array(values))
    }

    /// Create a profile from values in axis order, clamping each.
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            values: values.map(clamp_unit),
        }
    }

    /// The all-zero profile.
    pub fn zero() -> Self {
        Self { values: [0.0; 4] }
    }

    /// The profile assigned to text that cannot be scored.
    pub fn neutral() -> Self {
        Self::from_array([NEUTRAL_AXIS_VALUE; 4])
    }

    pub fn love(&self) -> f64 {
        self.values[0]
    }

    pub fn justice(&self) -> f64 {
        self.values[1]
    }

    pub fn power(&self) -> f64 {
        self.values[2]
    }

    pub fn wisdom(&self) -> f64 {
        self.values[3]
    }

    /// Value on a single axis.
    pub fn get(&self, axis: Axis) -> f64 {
        self.values[axis.index()]
    }

    /// Values in axis order (L, J, P, W).
    pub fn as_array(&self) -> [f64; 4] {
        self.values
    }

    /// A copy with one axis replaced (and clamped).
    pub fn with(&self, axis: Axis, value: f64) -> Self {
        let mut values = self.values;
        values[axis.index()] = value;
        Self::from_array(values)
    }

    /// Euclidean distance in 4D space.
    pub fn distance_to(&self, other: &LjpwProfile) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .fold(0.0, |acc, sq| acc + sq)
            .sqrt()
    }

    /// Axis with the highest value. Ties go to the earlier axis (L, J, P, W).
    pub fn dominant_axis(&self) -> Axis {
        let mut best = Axis::Love;
        for axis in Axis::ALL.into_iter().skip(1) {
            if self.get(axis) > self.get(best) {
                best = axis;
            }
        }
        best
    }

    /// Mean of the four axes: the profile's functional footprint.
    pub fn volume(&self) -> f64 {
        self.values.iter().fold(0.0, |acc, v| acc + v) / 4.0
    }
}

impl Default for LjpwProfile {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for LjpwProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LJPW(L={:.3}, J={:.3}, P={:.3}, W={:.3})",
            self.values[0], self.values[1], self.values[2], self.values[3]
        )
    }
}

impl From<[f64; 4]> for LjpwProfile {
    fn from(values: [f64; 4]) -> Self {
        Self::from_array(values)
    }
}

/// Clamp to [0, 1], sending NaN to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Wire form of a profile. Every axis must be present and numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProfile {
    #[serde(rename = "L", alias = "love")]
    love: Option<f64>,
    #[serde(rename = "J", alias = "justice")]
    justice: Option<f64>,
    #[serde(rename = "P", alias = "power")]
    power: Option<f64>,
    #[serde(rename = "W", alias = "wisdom")]
    wisdom: Option<f64>,
}

impl TryFrom<RawProfile> for LjpwProfile {
    type Error = ProfileError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let fields = [raw.love, raw.justice, raw.power, raw.wisdom];
        let mut values = [0.0; 4];
        for axis in Axis::ALL {
            values[axis.index()] = fields[axis.index()].ok_or(ProfileError::MissingAxis {
                axis: axis.symbol(),
            })?;
        }
        LjpwProfile::try_new(values[0], values[1], values[2], values[3])
    }
}

impl From<LjpwProfile> for RawProfile {
    fn from(profile: LjpwProfile) -> Self {
        Self {
            love: Some(profile.love()),
            justice: Some(profile.justice()),
            power: Some(profile.power()),
            wisdom: Some(profile.wisdom()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_out_of_range() {
        let p = LjpwProfile::new(-0.5, 1.7, 0.4, f64::INFINITY);
        assert_eq!(p.as_array(), [0.0, 1.0, 0.4, 1.0]);
    }

    #[test]
    fn test_new_maps_nan_to_zero() {
        let p = LjpwProfile::new(f64::NAN, 0.5, 0.5, 0.5);
        assert_eq!(p.love(), 0.0);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        let err = LjpwProfile::try_new(0.1, f64::NAN, 0.1, 0.1).unwrap_err();
        assert_eq!(err, ProfileError::NonNumericAxis { axis: 'J' });
    }

    #[test]
    fn test_dominant_axis_tie_break() {
        let p = LjpwProfile::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(p.dominant_axis(), Axis::Love);
        let p = LjpwProfile::new(0.1, 0.7, 0.2, 0.7);
        assert_eq!(p.dominant_axis(), Axis::Justice);
        let p = LjpwProfile::new(0.1, 0.2, 0.3, 0.9);
        assert_eq!(p.dominant_axis(), Axis::Wisdom);
    }

    #[test]
    fn test_distance_to_anchor() {
        let d = LjpwProfile::zero().distance_to(&LjpwProfile::ANCHOR);
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_with_clamps() {
        let p = LjpwProfile::zero().with(Axis::Power, 3.0);
        assert_eq!(p.power(), 1.0);
    }

    #[test]
    fn test_json_round_trip_uses_axis_symbols() {
        let p = LjpwProfile::new(0.25, 0.5, 0.75, 1.0);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"L\":0.25"));
        let back: LjpwProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_json_missing_axis_rejected() {
        let result: Result<LjpwProfile, _> = serde_json::from_str(r#"{"L":0.1,"J":0.2,"P":0.3}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Axis W is missing"), "unexpected error: {err}");
    }

    #[test]
    fn test_json_accepts_long_names_and_clamps() {
        let p: LjpwProfile =
            serde_json::from_str(r#"{"love":2.0,"justice":0.5,"power":-1.0,"wisdom":0.0}"#)
                .unwrap();
        assert_eq!(p.as_array(), [1.0, 0.5, 0.0, 0.0]);
    }
}
