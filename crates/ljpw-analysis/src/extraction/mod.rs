//! Heuristic extraction: source text to an LJPW profile.
//!
//! One [`TextFeatureExtractor`] per language, chosen explicitly by the
//! caller. Extension-based detection lives in [`Language::from_path`] and
//! is only used by the scanner.

pub mod extractor;
pub mod flags;
pub mod heuristic;
pub mod language;
pub mod languages;
pub mod rules;

pub use extractor::{ExtractionEvidence, ExtractorRegistry, RuleEvidence, TextFeatureExtractor};
pub use flags::FlagRegexSet;
pub use heuristic::HeuristicExtractor;
pub use language::Language;
pub use rules::{Contribution, Matcher, RuleDefinition, RuleTable};
