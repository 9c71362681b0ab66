//! Structural flags: booleans describing how a composite was assembled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A recognized structural feature of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralFeature {
    Docstring,
    TypeHints,
    ErrorHandling,
    Logging,
    Testing,
    State,
    History,
    Validation,
}

impl StructuralFeature {
    /// All features, in parameter-vector order.
    pub const ALL: [StructuralFeature; 8] = [
        StructuralFeature::Docstring,
        StructuralFeature::TypeHints,
        StructuralFeature::ErrorHandling,
        StructuralFeature::Logging,
        StructuralFeature::Testing,
        StructuralFeature::State,
        StructuralFeature::History,
        StructuralFeature::Validation,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Docstring => 0,
            Self::TypeHints => 1,
            Self::ErrorHandling => 2,
            Self::Logging => 3,
            Self::Testing => 4,
            Self::State => 5,
            Self::History => 6,
            Self::Validation => 7,
        }
    }

    /// Mapping key, e.g. `has_logging`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Docstring => "has_docstring",
            Self::TypeHints => "has_type_hints",
            Self::ErrorHandling => "has_error_handling",
            Self::Logging => "has_logging",
            Self::Testing => "has_testing",
            Self::State => "has_state",
            Self::History => "has_history",
            Self::Validation => "has_validation",
        }
    }

    /// Short name without the `has_` prefix.
    pub fn name(self) -> &'static str {
        &self.key()[4..]
    }

    /// Look up a feature by mapping key. The `has_` prefix is optional.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        let bare = key.strip_prefix("has_").unwrap_or(key);
        Self::ALL.into_iter().find(|f| f.name() == bare)
    }
}

impl fmt::Display for StructuralFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The set of structural flags attached to one composition call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct StructuralFlags {
    present: [bool; 8],
}

impl StructuralFlags {
    /// No flags set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder-style: returns a copy with `feature` set.
    pub fn with(mut self, feature: StructuralFeature) -> Self {
        self.present[feature.index()] = true;
        self
    }

    pub fn set(&mut self, feature: StructuralFeature, value: bool) {
        self.present[feature.index()] = value;
    }

    pub fn is_set(&self, feature: StructuralFeature) -> bool {
        self.present[feature.index()]
    }

    /// Number of recognized flags that are true.
    pub fn count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    /// Features that are set, in parameter-vector order.
    pub fn iter_present(&self) -> impl Iterator<Item = StructuralFeature> + '_ {
        StructuralFeature::ALL
            .into_iter()
            .filter(move |f| self.is_set(*f))
    }

    /// Build from key/value pairs. Unknown keys are ignored.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut flags = Self::none();
        for (key, value) in pairs {
            if let Some(feature) = StructuralFeature::from_key(key.as_ref()) {
                flags.set(feature, value);
            }
        }
        flags
    }
}

impl FromIterator<StructuralFeature> for StructuralFlags {
    fn from_iter<T: IntoIterator<Item = StructuralFeature>>(iter: T) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl From<BTreeMap<String, bool>> for StructuralFlags {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<StructuralFlags> for BTreeMap<String, bool> {
    fn from(flags: StructuralFlags) -> Self {
        StructuralFeature::ALL
            .into_iter()
            .map(|f| (f.key().to_string(), flags.is_set(f)))
            .collect()
    }
}

impl fmt::Display for StructuralFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_present().map(|feat| feat.name()).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let flags = StructuralFlags::from_pairs([
            ("has_logging", true),
            ("has_validation", true),
            ("has_telepathy", true),
            ("has_state", false),
        ]);
        assert_eq!(flags.count(), 2);
        assert!(flags.is_set(StructuralFeature::Logging));
        assert!(!flags.is_set(StructuralFeature::State));
    }

    #[test]
    fn test_from_key_accepts_bare_names() {
        assert_eq!(
            StructuralFeature::from_key("type_hints"),
            Some(StructuralFeature::TypeHints)
        );
        assert_eq!(
            StructuralFeature::from_key("has_type_hints"),
            Some(StructuralFeature::TypeHints)
        );
        assert_eq!(StructuralFeature::from_key("has_"), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, f) in StructuralFeature::ALL.into_iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_json_mapping() {
        let flags: StructuralFlags =
            serde_json::from_str(r#"{"has_logging": true, "has_unknown": true}"#).unwrap();
        assert_eq!(flags, StructuralFlags::none().with(StructuralFeature::Logging));

        let json = serde_json::to_string(&flags).unwrap();
        assert!(json.contains("\"has_logging\":true"));
        assert!(json.contains("\"has_state\":false"));
    }

    #[test]
    fn test_collect_and_display() {
        let flags: StructuralFlags = [StructuralFeature::Testing, StructuralFeature::Docstring]
            .into_iter()
            .collect();
        assert_eq!(flags.to_string(), "docstring, testing");
        assert_eq!(StructuralFlags::none().to_string(), "none");
    }
}
