//! Extraction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the heuristic extractors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Languages the scanner extracts. Empty means every supported language.
    pub languages: Vec<String>,
    /// Detect structural flags alongside each profile. Default: true.
    pub detect_flags: Option<bool>,
}

impl ExtractionConfig {
    /// Returns true when `language` (case-insensitive) is enabled.
    pub fn is_language_enabled(&self, language: &str) -> bool {
        self.languages.is_empty()
            || self
                .languages
                .iter()
                .any(|l| l.trim().eq_ignore_ascii_case(language))
    }

    pub fn effective_detect_flags(&self) -> bool {
        self.detect_flags.unwrap_or(true)
    }
}
