//! The four LJPW axes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ProfileError;

/// One of the four profile dimensions, in declaration order.
///
/// Declaration order doubles as the tie-break priority wherever a
/// "largest axis" is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "L", alias = "love")]
    Love,
    #[serde(rename = "J", alias = "justice")]
    Justice,
    #[serde(rename = "P", alias = "power")]
    Power,
    #[serde(rename = "W", alias = "wisdom")]
    Wisdom,
}

impl Axis {
    /// All axes in declaration order.
    pub const ALL: [Axis; 4] = [Axis::Love, Axis::Justice, Axis::Power, Axis::Wisdom];

    /// Position of this axis inside a profile's value array.
    pub fn index(self) -> usize {
        match self {
            Axis::Love => 0,
            Axis::Justice => 1,
            Axis::Power => 2,
            Axis::Wisdom => 3,
        }
    }

    /// Single-letter symbol.
    pub fn symbol(self) -> char {
        match self {
            Axis::Love => 'L',
            Axis::Justice => 'J',
            Axis::Power => 'P',
            Axis::Wisdom => 'W',
        }
    }

    /// Lowercase axis name.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Love => "love",
            Axis::Justice => "justice",
            Axis::Power => "power",
            Axis::Wisdom => "wisdom",
        }
    }

    /// Parse an axis from its symbol or name, case-insensitively.
    pub fn parse(s: &str) -> Result<Axis, ProfileError> {
        let lowered = s.trim().to_ascii_lowercase();
        Axis::ALL
            .into_iter()
            .find(|axis| {
                lowered == axis.name() || lowered == axis.symbol().to_ascii_lowercase().to_string()
            })
            .ok_or_else(|| ProfileError::UnknownAxis(s.to_string()))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
