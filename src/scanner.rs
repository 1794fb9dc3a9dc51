use std::path::{Component, Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::types::{BrokenLink, ReadFailure, ScanStats};

/// Target prefixes that mark a link as external rather than internal.
const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "data:", "mailto:"];

/// Scan all documents under `root` and check every internal link against the
/// filesystem. Walks in per-directory file-name order so repeated runs over
/// an unchanged tree produce identical output.
///
/// Per-document read failures are collected into the returned stats and
/// never abort the scan; only a missing root is fatal.
///
/// # Errors
///
/// Returns `Error::RootNotFound` if `root` does not exist or is not a
/// directory.
///
/// # Panics
///
/// Panics if the hardcoded link regex is invalid (compile-time invariant).
pub fn scan(root: &Path, config: &Config, verbose: bool) -> Result<ScanStats, Error> {
    let root = root
        .canonicalize()
        .map_err(|_err| return Error::RootNotFound { path: root.to_path_buf() })?;
    if !root.is_dir() {
        return Err(Error::RootNotFound { path: root });
    }

    // Absolute-style targets (leading `/`) resolve one level above the root.
    let repo_root = root.parent().unwrap_or(&root).to_path_buf();

    let pattern = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex");
    let mut stats = ScanStats::default();

    for entry in WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file())
    {
        let doc = entry.path();
        let relative = doc.strip_prefix(&root).unwrap_or(doc);

        if !config.is_document(doc) || config.is_excluded(relative) {
            continue;
        }

        stats.files_scanned = stats.files_scanned.saturating_add(1);

        let content = match std::fs::read_to_string(doc) {
            Ok(c) => c,
            Err(e) => {
                stats.read_failures.push(ReadFailure {
                    path: doc.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            },
        };

        check_document_links(&content, doc, relative, &repo_root, &pattern, verbose, &mut stats);
    }

    Ok(stats)
}

/// Extract every `[text](target)` link from one document's content, resolve
/// the internal ones, and record those whose target does not exist.
fn check_document_links(
    content: &str,
    doc: &Path,
    relative: &Path,
    repo_root: &Path,
    pattern: &Regex,
    verbose: bool,
    stats: &mut ScanStats,
) {
    for cap in pattern.captures_iter(content) {
        let text = &cap[1];
        let target = &cap[2];

        if !is_internal_target(target) {
            continue;
        }

        stats.total_links = stats.total_links.saturating_add(1);

        // Fragments name anchors, not filesystem components.
        let clean = match target.split_once('#') {
            Some((head, _fragment)) => head,
            None => target,
        };
        // Counted above, but nothing left to check once the fragment is gone.
        if clean.is_empty() {
            continue;
        }

        let resolved = resolve_target(clean, doc, repo_root);
        if resolved.exists() {
            continue;
        }

        if verbose {
            eprintln!("✗ {}: [{text}]({target})", relative.display());
        }

        stats.broken.push(BrokenLink {
            resolved,
            source: relative.to_path_buf(),
            target: target.to_string(),
            text: text.to_string(),
        });
    }
}

/// Decide whether a raw target points at a local filesystem entry.
/// External schemes, pure in-document fragments, empty targets, and the
/// literal `path` placeholder are all skipped without being counted.
fn is_internal_target(target: &str) -> bool {
    if EXTERNAL_PREFIXES.iter().any(|p| return target.starts_with(p)) {
        return false;
    }
    if target.starts_with('#') {
        return false;
    }
    if target.is_empty() || target == "path" {
        return false;
    }
    true
}

/// Map a fragment-stripped target to the filesystem path to check.
/// A leading separator means repo-root-relative: one level above the scan
/// root, leading separators stripped. Anything else is relative to the
/// referencing document's own directory.
fn resolve_target(clean: &str, doc: &Path, repo_root: &Path) -> PathBuf {
    if clean.starts_with('/') {
        return repo_root.join(clean.trim_start_matches('/'));
    }
    let doc_dir = doc.parent().unwrap_or(Path::new(""));
    normalize_path(&doc_dir.join(clean))
}

/// Collapse `.` and `..` components in a path without touching the
/// filesystem. `..` never pops past the filesystem root, and leading `..`
/// is preserved when there is nothing left to pop.
fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                let poppable = matches!(
                    parts.last(),
                    Some(c) if !matches!(c, Component::ParentDir | Component::RootDir)
                );
                if poppable {
                    parts.pop();
                } else if !matches!(parts.last(), Some(Component::RootDir)) {
                    parts.push(component);
                }
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
