//! Parallel file scanner using ignore + rayon.
//!
//! The walk itself is sequential (ignore rules depend on directory order);
//! reading and extraction run on the rayon pool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;

use ljpw_core::config::{ExtractionConfig, LjpwConfig, ScanConfig};
use ljpw_core::errors::ScanError;
use ljpw_core::types::{LjpwProfile, StructuralFlags};

use super::cancellation::ScanCancellation;
use super::types::{base_clarity_for, ScanEntry, ScanReport, ScanStats};
use crate::extraction::{ExtractorRegistry, Language};

/// Scans a directory tree into per-file profiles.
pub struct Scanner {
    registry: ExtractorRegistry,
    config: ScanConfig,
    extraction: ExtractionConfig,
    cancellation: ScanCancellation,
}

/// A file that passed every filter, waiting for extraction.
struct Candidate {
    path: PathBuf,
    relative: String,
    language: Language,
    size: u64,
}

enum Outcome {
    Entry(ScanEntry),
    /// Read or decode failed; scored as neutral.
    Unreadable(ScanEntry),
    TooLarge,
}

struct Processed {
    entries: Vec<ScanEntry>,
    skipped: usize,
    unreadable: usize,
    errors: Vec<String>,
}

impl Scanner {
    pub fn new(registry: ExtractorRegistry, config: ScanConfig, extraction: ExtractionConfig) -> Self {
        Self {
            registry,
            config,
            extraction,
            cancellation: ScanCancellation::new(),
        }
    }

    /// Scanner with the built-in extractors and the `scan` and `extraction`
    /// sections of `config`.
    pub fn from_config(config: &LjpwConfig) -> Result<Self, ScanError> {
        Ok(Self::new(
            ExtractorRegistry::with_all_extractors()?,
            config.scan.clone(),
            config.extraction.clone(),
        ))
    }

    pub fn with_cancellation(mut self, cancellation: ScanCancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &ScanCancellation {
        &self.cancellation
    }

    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::RootNotFound {
                path: root.display().to_string(),
            });
        }
        let started = Instant::now();
        tracing::info!(root = %root.display(), "scan started");

        let mut errors = Vec::new();
        let candidates = self.collect_candidates(root, &mut errors)?;

        let threads = self.config.effective_threads();
        let processed = if threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ScanError::Walk(format!("thread pool: {e}")))?;
            pool.install(|| self.process(&candidates))
        } else {
            self.process(&candidates)
        };
        if self.cancellation.is_cancelled() {
            tracing::warn!(root = %root.display(), "scan cancelled");
            return Err(ScanError::Cancelled);
        }
        errors.extend(processed.errors);

        let mut entries = processed.entries;
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let mut stats = ScanStats {
            files_scanned: entries.len(),
            files_skipped: processed.skipped,
            files_unreadable: processed.unreadable,
            ..ScanStats::default()
        };
        for entry in &entries {
            stats.total_bytes += entry.size;
            *stats
                .by_language
                .entry(entry.language.key().to_string())
                .or_insert(0) += 1;
        }
        stats.duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            root = %root.display(),
            files = stats.files_scanned,
            skipped = stats.files_skipped,
            unreadable = stats.files_unreadable,
            duration_ms = stats.duration_ms,
            "scan finished"
        );

        Ok(ScanReport {
            root: root.display().to_string(),
            entries,
            stats,
            errors,
        })
    }

    /// Walk `root` and keep the files with an enabled, registered language.
    fn collect_candidates(
        &self,
        root: &Path,
        errors: &mut Vec<String>,
    ) -> Result<Vec<Candidate>, ScanError> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!self.config.effective_include_hidden())
            .follow_links(self.config.effective_follow_symlinks())
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .overrides(self.overrides(root)?);

        let mut candidates = Vec::new();
        for result in builder.build() {
            if self.cancellation.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "walk error");
                    errors.push(e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let Some(language) = Language::from_path(path) else {
                continue;
            };
            if !self.extraction.is_language_enabled(language.name())
                || self.registry.get(language).is_none()
            {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            candidates.push(Candidate {
                path: path.to_path_buf(),
                relative,
                language,
                size,
            });
        }
        Ok(candidates)
    }

    /// Extra ignore patterns, expressed as negated overrides.
    fn overrides(&self, root: &Path) -> Result<Override, ScanError> {
        let mut builder = OverrideBuilder::new(root);
        for pattern in &self.config.extra_ignore {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                continue;
            }
            builder
                .add(&format!("!{pattern}"))
                .map_err(|e| ScanError::Walk(format!("ignore pattern {pattern}: {e}")))?;
        }
        builder
            .build()
            .map_err(|e| ScanError::Walk(e.to_string()))
    }

    /// Extract every candidate in parallel.
    fn process(&self, candidates: &[Candidate]) -> Processed {
        let skipped = AtomicUsize::new(0);
        let unreadable = AtomicUsize::new(0);
        let errors: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let max_size = self.config.effective_max_file_size();

        let entries = candidates
            .par_iter()
            .filter_map(|candidate| {
                if self.cancellation.is_cancelled() {
                    return None;
                }
                match self.process_file(candidate, max_size, &errors) {
                    Outcome::Entry(entry) => Some(entry),
                    Outcome::Unreadable(entry) => {
                        unreadable.fetch_add(1, Ordering::Relaxed);
                        Some(entry)
                    }
                    Outcome::TooLarge => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        None
                    }
                }
            })
            .collect();

        Processed {
            entries,
            skipped: skipped.into_inner(),
            unreadable: unreadable.into_inner(),
            errors: errors.into_inner().unwrap_or_default(),
        }
    }

    fn process_file(&self, candidate: &Candidate, max_size: u64, errors: &Mutex<Vec<String>>) -> Outcome {
        if candidate.size > max_size {
            tracing::debug!(path = %candidate.relative, size = candidate.size, "skipping oversized file");
            return Outcome::TooLarge;
        }

        let file_name = candidate
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let neutral_entry = || ScanEntry {
            path: candidate.relative.clone(),
            language: candidate.language,
            size: candidate.size,
            profile: LjpwProfile::neutral(),
            flags: StructuralFlags::none(),
            concept_count: 1,
            base_clarity: base_clarity_for(&file_name),
            neutral: true,
        };

        let Some(extractor) = self.registry.get(candidate.language) else {
            return Outcome::Entry(neutral_entry());
        };

        let bytes = match fs::read(&candidate.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Ok(mut errs) = errors.lock() {
                    errs.push(format!("{}: {}", candidate.relative, e));
                }
                return Outcome::Unreadable(neutral_entry());
            }
        };
        let Ok(text) = std::str::from_utf8(&bytes) else {
            return Outcome::Unreadable(neutral_entry());
        };

        let evidence = extractor.extract_with_evidence(text);
        let flags = if self.extraction.effective_detect_flags() {
            extractor.detect_flags(text)
        } else {
            StructuralFlags::none()
        };
        Outcome::Entry(ScanEntry {
            path: candidate.relative.clone(),
            language: candidate.language,
            size: candidate.size,
            profile: evidence.profile,
            flags,
            concept_count: extractor.concept_count(text),
            base_clarity: base_clarity_for(&file_name),
            neutral: evidence.neutral,
        })
    }
}

/// Scan `root` with the built-in extractors for every language.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<ScanReport, ScanError> {
    Scanner::new(
        ExtractorRegistry::with_all_extractors()?,
        config.clone(),
        ExtractionConfig::default(),
    )
    .scan(root)
}
