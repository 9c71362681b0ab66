//! Structural flag detection: every flag pattern matched in one pass.

use regex::RegexSet;

use ljpw_core::errors::ExtractionError;
use ljpw_core::types::{StructuralFeature, StructuralFlags};

/// A compiled set of flag patterns for single-pass matching.
#[derive(Debug, Clone)]
pub struct FlagRegexSet {
    regex_set: RegexSet,
    /// Pattern index to the feature it sets.
    pattern_map: Vec<StructuralFeature>,
}

impl FlagRegexSet {
    pub fn new(patterns: &[(StructuralFeature, &str)]) -> Result<Self, ExtractionError> {
        let regex_set = RegexSet::new(patterns.iter().map(|(_, p)| *p)).map_err(|e| {
            ExtractionError::InvalidPattern {
                rule: "flag_patterns".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            regex_set,
            pattern_map: patterns.iter().map(|(f, _)| *f).collect(),
        })
    }

    /// Flags whose patterns occur anywhere in `content`.
    pub fn detect(&self, content: &str) -> StructuralFlags {
        self.regex_set
            .matches(content)
            .into_iter()
            .map(|idx| self.pattern_map[idx])
            .collect()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_detection() {
        let set = FlagRegexSet::new(&[
            (StructuralFeature::Logging, r"logger\."),
            (StructuralFeature::Testing, r"def test_"),
            (StructuralFeature::Testing, r"\bassert\b"),
        ])
        .unwrap();
        assert_eq!(set.pattern_count(), 3);

        let flags = set.detect("def test_add():\n    assert add(1, 2) == 3\n");
        assert!(flags.is_set(StructuralFeature::Testing));
        assert!(!flags.is_set(StructuralFeature::Logging));
        assert_eq!(flags.count(), 1);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FlagRegexSet::new(&[(StructuralFeature::State, "[")]).is_err());
    }
}
