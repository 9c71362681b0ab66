//! Scan results.

use serde::Serialize;
use std::collections::BTreeMap;

use ljpw_core::types::{LjpwProfile, StructuralFlags};

use crate::extraction::Language;
use crate::metrics::{build_fractal_tree, Entity, FractalProfile, SystemSummary};

/// Group name for files directly under the scan root.
pub const ROOT_GROUP: &str = "_root";

/// One extracted file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    /// Path relative to the scan root, `/`-separated.
    pub path: String,
    pub language: Language,
    pub size: u64,
    pub profile: LjpwProfile,
    pub flags: StructuralFlags,
    pub concept_count: usize,
    /// `min(1, 0.5 + 1 / (1 + len(file_name) / 20))`: shorter names read as
    /// more focused.
    pub base_clarity: f64,
    /// True when the file got the neutral profile: unreadable, not UTF-8,
    /// blank or binary.
    pub neutral: bool,
}

impl ScanEntry {
    pub fn to_entity(&self) -> Entity {
        Entity::new(self.path.clone(), self.profile)
            .with_concepts(self.concept_count)
            .with_base_clarity(self.base_clarity)
    }

    /// First path component, or [`ROOT_GROUP`] for top-level files.
    pub fn group(&self) -> &str {
        match self.path.split_once('/') {
            Some((first, _)) => first,
            None => ROOT_GROUP,
        }
    }
}

/// Base clarity from a file name's length in characters.
pub fn base_clarity_for(file_name: &str) -> f64 {
    let len = file_name.chars().count() as f64;
    (0.5 + 1.0 / (1.0 + len / 20.0)).min(1.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    /// Files above `max_file_size`.
    pub files_skipped: usize,
    /// Files that could not be read or were not UTF-8; scored as neutral.
    pub files_unreadable: usize,
    /// Files per language, keyed by the lowercase language name.
    pub by_language: BTreeMap<String, usize>,
    pub total_bytes: u64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub root: String,
    /// Sorted by path.
    pub entries: Vec<ScanEntry>,
    pub stats: ScanStats,
    /// Non-fatal walk and read errors.
    pub errors: Vec<String>,
}

impl ScanReport {
    pub fn entities(&self) -> Vec<Entity> {
        self.entries.iter().map(ScanEntry::to_entity).collect()
    }

    pub fn summary(&self) -> SystemSummary {
        SystemSummary::of(&self.entities())
    }

    /// Entry paths grouped by their top-level directory.
    pub fn groups(&self) -> BTreeMap<String, Vec<String>> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.group().to_string())
                .or_default()
                .push(entry.path.clone());
        }
        groups
    }

    /// Files, grouped by top-level directory, under one system root.
    pub fn fractal_tree(&self) -> FractalProfile {
        build_fractal_tree(&self.entities(), &self.groups(), &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_clarity_saturates_for_short_names() {
        assert_eq!(base_clarity_for(""), 1.0);
        assert_eq!(base_clarity_for("a.py"), 1.0);
        // 20 chars: 0.5 + 1/2.
        assert_eq!(base_clarity_for("abcdefghijklmnopq.py"), 1.0);
        // 60 chars: 0.5 + 1/4.
        assert!((base_clarity_for(&"x".repeat(60)) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_group_is_first_component() {
        let entry = ScanEntry {
            path: "src/lib.rs".to_string(),
            language: Language::Rust,
            size: 0,
            profile: LjpwProfile::neutral(),
            flags: StructuralFlags::none(),
            concept_count: 1,
            base_clarity: 1.0,
            neutral: true,
        };
        assert_eq!(entry.group(), "src");
        let top = ScanEntry {
            path: "main.py".to_string(),
            language: Language::Python,
            ..entry
        };
        assert_eq!(top.group(), ROOT_GROUP);
    }
}
