//! Languages with a heuristic rule table, and extension-based detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ljpw_core::errors::ExtractionError;

/// Languages the extractors understand.
///
/// JavaScript and TypeScript share one rule table but stay distinct so
/// scan reports keep the real language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Rust,
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::Rust,
        Language::JavaScript,
        Language::TypeScript,
    ];

    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext?.to_ascii_lowercase().as_str() {
            "py" | "pyi" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// Detect language from a path's extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Returns all file extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyi"],
            Language::Rust => &["rs"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
        }
    }

    /// Lowercase key, the same spelling serde uses.
    pub fn key(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Rust => "rust",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "rust" | "rs" => Ok(Language::Rust),
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            other => Err(ExtractionError::UnsupportedLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension(Some("py")), Some(Language::Python));
        assert_eq!(Language::from_extension(Some("TSX")), Some(Language::TypeScript));
        assert_eq!(Language::from_extension(Some("go")), None);
        assert_eq!(Language::from_extension(None), None);
    }

    #[test]
    fn test_extensions_round_trip() {
        for lang in Language::ALL {
            for ext in lang.extensions() {
                assert_eq!(Language::from_extension(Some(ext)), Some(lang));
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Rust".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_key_matches_serde_name() {
        for lang in Language::ALL {
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.key()));
            assert_eq!(lang.key().parse::<Language>().unwrap(), lang);
        }
    }
}
