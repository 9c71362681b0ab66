//! Rule tables: weighted pattern counts per axis.

use regex::Regex;
use serde::Serialize;

use ljpw_core::errors::ExtractionError;
use ljpw_core::types::{Axis, StructuralFeature};

use super::Language;

/// How a rule's occurrence count turns into an axis contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contribution {
    /// `min(cap, count * weight)`.
    Linear { weight: f64, cap: f64 },
    /// `bonus` once `count` exceeds `above`.
    Threshold { above: usize, bonus: f64 },
}

impl Contribution {
    pub fn apply(&self, count: usize) -> f64 {
        match *self {
            Contribution::Linear { weight, cap } => (count as f64 * weight).min(cap),
            Contribution::Threshold { above, bonus } => {
                if count > above {
                    bonus
                } else {
                    0.0
                }
            }
        }
    }
}

/// What a rule counts.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Non-overlapping occurrences of a literal.
    Substring(String),
    /// Non-overlapping occurrences of a literal, ignoring case.
    CaseInsensitive(String),
    /// Lines whose trimmed start begins with the literal.
    LineStartsWith(String),
    /// Lines containing the literal.
    LineContains(String),
    /// Non-overlapping regex matches.
    Pattern(String),
}

/// One weighted rule of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    pub id: &'static str,
    pub axis: Axis,
    pub matcher: Matcher,
    pub contribution: Contribution,
}

impl RuleDefinition {
    pub fn linear(id: &'static str, axis: Axis, matcher: Matcher, weight: f64, cap: f64) -> Self {
        Self {
            id,
            axis,
            matcher,
            contribution: Contribution::Linear { weight, cap },
        }
    }

    pub fn threshold(
        id: &'static str,
        axis: Axis,
        matcher: Matcher,
        above: usize,
        bonus: f64,
    ) -> Self {
        Self {
            id,
            axis,
            matcher,
            contribution: Contribution::Threshold { above, bonus },
        }
    }
}

/// Everything one language's extractor needs.
#[derive(Debug, Clone)]
pub struct RuleTable {
    pub language: Language,
    /// Per-axis base offsets in L, J, P, W order.
    pub base: [f64; 4],
    pub rules: Vec<RuleDefinition>,
    /// Patterns whose presence sets a structural flag.
    pub flag_patterns: Vec<(StructuralFeature, &'static str)>,
    /// Pattern matching one function or type definition.
    pub concept_pattern: &'static str,
}

/// A matcher ready to count.
#[derive(Debug, Clone)]
pub(crate) enum CompiledMatcher {
    Substring(String),
    CaseInsensitive(String),
    LineStartsWith(String),
    LineContains(String),
    Pattern(Regex),
}

impl CompiledMatcher {
    pub(crate) fn compile(rule: &RuleDefinition) -> Result<Self, ExtractionError> {
        let invalid = |message: &str| ExtractionError::InvalidPattern {
            rule: rule.id.to_string(),
            message: message.to_string(),
        };
        let non_empty = |s: &String| -> Result<String, ExtractionError> {
            if s.is_empty() {
                Err(invalid("literal must not be empty"))
            } else {
                Ok(s.clone())
            }
        };
        Ok(match &rule.matcher {
            Matcher::Substring(s) => Self::Substring(non_empty(s)?),
            Matcher::CaseInsensitive(s) => Self::CaseInsensitive(non_empty(s)?.to_lowercase()),
            Matcher::LineStartsWith(s) => Self::LineStartsWith(non_empty(s)?),
            Matcher::LineContains(s) => Self::LineContains(non_empty(s)?),
            Matcher::Pattern(p) => Self::Pattern(Regex::new(p).map_err(|e| invalid(&e.to_string()))?),
        })
    }

    /// Count occurrences. `lowered` is `text.to_lowercase()`, computed once per text.
    pub(crate) fn count(&self, text: &str, lowered: &str) -> usize {
        match self {
            Self::Substring(s) => text.matches(s.as_str()).count(),
            Self::CaseInsensitive(s) => lowered.matches(s.as_str()).count(),
            Self::LineStartsWith(s) => text
                .lines()
                .filter(|l| l.trim_start().starts_with(s.as_str()))
                .count(),
            Self::LineContains(s) => text.lines().filter(|l| l.contains(s.as_str())).count(),
            Self::Pattern(re) => re.find_iter(text).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_saturates_at_cap() {
        let c = Contribution::Linear {
            weight: 0.04,
            cap: 0.2,
        };
        assert_eq!(c.apply(0), 0.0);
        assert!((c.apply(2) - 0.08).abs() < 1e-12);
        assert_eq!(c.apply(100), 0.2);
    }

    #[test]
    fn test_threshold_is_strict() {
        let c = Contribution::Threshold {
            above: 3,
            bonus: 0.1,
        };
        assert_eq!(c.apply(3), 0.0);
        assert_eq!(c.apply(4), 0.1);
    }

    #[test]
    fn test_matcher_counts() {
        let text = "# one\n  # two\nx = 1 # three\nLog log LOG";
        let lowered = text.to_lowercase();
        let count = |m: Matcher| {
            let rule = RuleDefinition::linear("t", Axis::Love, m, 1.0, 10.0);
            CompiledMatcher::compile(&rule).unwrap().count(text, &lowered)
        };
        assert_eq!(count(Matcher::LineStartsWith("#".into())), 2);
        assert_eq!(count(Matcher::LineContains("#".into())), 3);
        assert_eq!(count(Matcher::Substring("log".into())), 1);
        assert_eq!(count(Matcher::CaseInsensitive("LOG".into())), 3);
        assert_eq!(count(Matcher::Pattern(r"\b\w+\b".into())), 8);
    }

    #[test]
    fn test_compile_rejects_bad_rules() {
        let bad_regex = RuleDefinition::linear("bad", Axis::Power, Matcher::Pattern("(".into()), 1.0, 1.0);
        let err = CompiledMatcher::compile(&bad_regex).unwrap_err();
        assert!(err.to_string().contains("bad"));

        let empty = RuleDefinition::linear("empty", Axis::Power, Matcher::Substring(String::new()), 1.0, 1.0);
        assert!(CompiledMatcher::compile(&empty).is_err());
    }
}
