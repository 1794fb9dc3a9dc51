/// Core domain types for linklint scans and reports.
use std::path::PathBuf;

use serde::Serialize;

/// A link whose resolved target does not exist on disk.
/// Produced by the scanner in discovery order and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    /// Resolved filesystem path that was checked and not found.
    pub resolved: PathBuf,
    /// Markdown file containing the link, relative to the scan root.
    pub source: PathBuf,
    /// Raw target string as written by the author, fragment included.
    pub target: String,
    /// Display text of the link.
    pub text: String,
}

/// A document that was discovered but could not be read as UTF-8 text.
/// Collected as a side list and reported on stderr after the scan.
#[derive(Debug, Clone)]
pub struct ReadFailure {
    /// Path of the unreadable document.
    pub path: PathBuf,
    /// Underlying cause, rendered as text.
    pub reason: String,
}

/// Everything one scan produced. Owned by the run and handed to the
/// reporter by reference; there is no other channel between the two.
#[derive(Debug, Default, Serialize)]
pub struct ScanStats {
    /// Broken links in discovery order: document order, then match order.
    pub broken: Vec<BrokenLink>,
    /// Number of documents examined, unreadable ones included.
    pub files_scanned: u32,
    /// Documents that could not be read. Excluded from serialized output.
    #[serde(skip)]
    pub read_failures: Vec<ReadFailure>,
    /// Number of internal links found, valid or not.
    pub total_links: u32,
}

impl ScanStats {
    /// Number of broken links, saturated into the counter width.
    pub fn broken_count(&self) -> u32 {
        return u32::try_from(self.broken.len()).unwrap_or(u32::MAX);
    }

    /// Number of links whose target exists.
    pub fn valid_count(&self) -> u32 {
        return self.total_links.saturating_sub(self.broken_count());
    }
}
