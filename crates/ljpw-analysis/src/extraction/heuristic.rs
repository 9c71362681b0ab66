//! Rule-table driven extractor.

use regex::Regex;

use ljpw_core::errors::ExtractionError;
use ljpw_core::types::{LjpwProfile, StructuralFlags};

use super::extractor::{ExtractionEvidence, RuleEvidence, TextFeatureExtractor};
use super::flags::FlagRegexSet;
use super::languages;
use super::rules::{CompiledMatcher, RuleDefinition, RuleTable};
use super::Language;

/// Extractor that scores text with a compiled [`RuleTable`].
///
/// Each axis is `base + Σ contribution(count)` over its rules, clamped to
/// [0, 1]. Counts are raw occurrences; no rule divides by text length.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    language: Language,
    base: [f64; 4],
    rules: Vec<(RuleDefinition, CompiledMatcher)>,
    flags: FlagRegexSet,
    concepts: Regex,
}

impl HeuristicExtractor {
    /// Compile a rule table.
    pub fn new(table: RuleTable) -> Result<Self, ExtractionError> {
        let rules = table
            .rules
            .into_iter()
            .map(|rule| CompiledMatcher::compile(&rule).map(|m| (rule, m)))
            .collect::<Result<Vec<_>, _>>()?;
        let flags = FlagRegexSet::new(&table.flag_patterns)?;
        let concepts =
            Regex::new(table.concept_pattern).map_err(|e| ExtractionError::InvalidPattern {
                rule: "concept_pattern".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            language: table.language,
            base: table.base,
            rules,
            flags,
            concepts,
        })
    }

    /// The built-in extractor for a language.
    pub fn for_language(language: Language) -> Result<Self, ExtractionError> {
        Self::new(languages::rule_table(language))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Text with nothing to score: blank, or binary (contains NUL).
fn is_unscorable(text: &str) -> bool {
    text.trim().is_empty() || text.contains('\0')
}

impl TextFeatureExtractor for HeuristicExtractor {
    fn language(&self) -> Language {
        self.language
    }

    fn extract_with_evidence(&self, text: &str) -> ExtractionEvidence {
        if is_unscorable(text) {
            return ExtractionEvidence {
                language: self.language,
                profile: LjpwProfile::neutral(),
                raw: LjpwProfile::neutral().as_array(),
                rules: Vec::new(),
                neutral: true,
            };
        }

        let lowered = text.to_lowercase();
        let mut raw = self.base;
        let mut evidence = Vec::with_capacity(self.rules.len());
        for (rule, matcher) in &self.rules {
            let count = matcher.count(text, &lowered);
            let value = rule.contribution.apply(count);
            raw[rule.axis.index()] += value;
            evidence.push(RuleEvidence {
                rule: rule.id,
                axis: rule.axis,
                count,
                contribution: rule.contribution,
                value,
            });
        }

        let profile = LjpwProfile::from_array(raw);
        tracing::trace!(
            language = %self.language,
            rules_evaluated = evidence.len(),
            profile = %profile,
            "extracted profile"
        );
        ExtractionEvidence {
            language: self.language,
            profile,
            raw,
            rules: evidence,
            neutral: false,
        }
    }

    fn detect_flags(&self, text: &str) -> StructuralFlags {
        if is_unscorable(text) {
            return StructuralFlags::none();
        }
        self.flags.detect(text)
    }

    fn concept_count(&self, text: &str) -> usize {
        if is_unscorable(text) {
            return 1;
        }
        self.concepts.find_iter(text).count() + 1
    }
}
