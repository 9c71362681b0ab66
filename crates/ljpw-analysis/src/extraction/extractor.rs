//! The extractor capability and its registry.

use serde::Serialize;

use ljpw_core::errors::ExtractionError;
use ljpw_core::types::{Axis, LjpwProfile, StructuralFlags};

use super::rules::Contribution;
use super::{HeuristicExtractor, Language};

/// How one rule fired for one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEvidence {
    pub rule: &'static str,
    pub axis: Axis,
    pub count: usize,
    pub contribution: Contribution,
    /// Value this rule added to its axis (before clamping).
    pub value: f64,
}

/// A profile together with the rule activity that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionEvidence {
    pub language: Language,
    pub profile: LjpwProfile,
    /// Per-axis sums before clamping, in L, J, P, W order.
    pub raw: [f64; 4],
    pub rules: Vec<RuleEvidence>,
    /// True when the text could not be scored and the neutral profile was used.
    pub neutral: bool,
}

/// Source text to profile, for one language.
///
/// Implementations are stateless after construction, so one instance can
/// be shared across scanner threads.
pub trait TextFeatureExtractor: Send + Sync {
    fn language(&self) -> Language;

    /// Profile plus the per-rule counts behind it.
    fn extract_with_evidence(&self, text: &str) -> ExtractionEvidence;

    /// Structural flags visible in the text.
    fn detect_flags(&self, text: &str) -> StructuralFlags;

    /// Function and type definitions plus one.
    fn concept_count(&self, text: &str) -> usize;

    fn extract(&self, text: &str) -> LjpwProfile {
        self.extract_with_evidence(text).profile
    }

    /// Extract from raw bytes. Undecodable input yields the neutral profile.
    fn extract_bytes(&self, bytes: &[u8]) -> LjpwProfile {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.extract(text),
            Err(_) => LjpwProfile::neutral(),
        }
    }
}

/// Registry of extractors, one per language.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextFeatureExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Register an extractor, replacing any existing one for its language.
    pub fn register(&mut self, extractor: Box<dyn TextFeatureExtractor>) {
        self.extractors.retain(|e| e.language() != extractor.language());
        self.extractors.push(extractor);
    }

    /// Registry with the built-in heuristic extractor for every language.
    pub fn with_all_extractors() -> Result<Self, ExtractionError> {
        let mut registry = Self::new();
        for language in Language::ALL {
            registry.register(Box::new(HeuristicExtractor::for_language(language)?));
        }
        Ok(registry)
    }

    pub fn get(&self, language: Language) -> Option<&dyn TextFeatureExtractor> {
        self.extractors
            .iter()
            .find(|e| e.language() == language)
            .map(|e| e.as_ref())
    }

    pub fn languages(&self) -> Vec<Language> {
        self.extractors.iter().map(|e| e.language()).collect()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
