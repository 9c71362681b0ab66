//! Scanner configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_FILE_SIZE, DEFAULT_THREADS};

/// Configuration for the file-system scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Files larger than this are skipped. Default: 1MB.
    pub max_file_size: Option<u64>,
    /// Number of threads for parallel extraction. 0 = auto-detect.
    pub threads: Option<usize>,
    /// Additional ignore patterns (gitignore syntax).
    pub extra_ignore: Vec<String>,
    /// Whether to follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Whether to include hidden files and directories. Default: false.
    pub include_hidden: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Returns the effective thread count, defaulting to 0 (auto-detect).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_include_hidden(&self) -> bool {
        self.include_hidden.unwrap_or(false)
    }
}
