//! Scanner: walk a tree, detect each file's language, extract in parallel.

pub mod cancellation;
pub mod types;
pub mod walker;

pub use cancellation::ScanCancellation;
pub use types::{base_clarity_for, ScanEntry, ScanReport, ScanStats, ROOT_GROUP};
pub use walker::{scan, Scanner};
