//! Report rendering: aggregate broken links into per-file and per-target
//! frequency tables and format the run summary.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::hash::Hash;
use std::path::Path;

use crate::types::{BrokenLink, ScanStats};

/// Banner line shared by the report header and footer.
const BANNER: &str = "======================================================================";

/// Files listed in the per-file ranking.
const TOP_FILES: usize = 10;
/// Targets listed in the per-target ranking.
const TOP_TARGETS: usize = 15;
/// Files shown in the detailed breakdown.
const DETAIL_FILES: usize = 5;
/// Broken links shown per file in the detailed breakdown.
const DETAIL_LINKS_PER_FILE: usize = 5;

/// Render the full validation report. Pure function of the stats, so two
/// scans of an unchanged tree render byte-identical reports.
pub fn render(stats: &ScanStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "MARKDOWN LINK VALIDATION REPORT");
    let _ = writeln!(out, "{BANNER}");

    let _ = writeln!(out, "\nStatistics:");
    let _ = writeln!(out, "  Files scanned:        {}", stats.files_scanned);
    let _ = writeln!(out, "  Total internal links: {}", stats.total_links);
    let _ = writeln!(out, "  Broken links:         {}", stats.broken_count());
    let _ = writeln!(out, "  Valid links:          {}", stats.valid_count());
    let _ = writeln!(out, "  Success rate:         {}", success_rate(stats));

    if stats.broken.is_empty() {
        let _ = writeln!(out, "\nAll links are valid!");
        let _ = writeln!(out, "\n{BANNER}");
        return out;
    }

    let groups = group_by_file(&stats.broken);
    let _ = writeln!(out, "\nFiles with broken links: {}", groups.len());

    render_file_ranking(&mut out, &groups);
    render_target_ranking(&mut out, &stats.broken);
    render_detail(&mut out, &groups);

    let _ = writeln!(out, "\n{BANNER}");
    out
}

/// Success rate as a percentage with one decimal place. An empty corpus has
/// no meaningful rate and must not divide by zero.
fn success_rate(stats: &ScanStats) -> String {
    if stats.total_links == 0 {
        return "N/A".to_string();
    }
    let rate = f64::from(stats.valid_count()) / f64::from(stats.total_links) * 100.0;
    format!("{rate:.1}%")
}

/// Files ranked by broken-link count, descending. The stable sort keeps
/// first-encounter order for ties.
fn render_file_ranking(out: &mut String, groups: &[(&Path, Vec<&BrokenLink>)]) {
    let mut ranked: Vec<(&Path, usize)> =
        groups.iter().map(|(file, links)| return (*file, links.len())).collect();
    ranked.sort_by(|a, b| return b.1.cmp(&a.1));

    let _ = writeln!(out, "\nTop {TOP_FILES} files with most broken links:");
    for (file, count) in ranked.iter().take(TOP_FILES) {
        let _ = writeln!(out, "  {count:>3}x  {}", file.display());
    }
}

/// Raw target strings ranked by frequency, descending, same tie rule.
fn render_target_ranking(out: &mut String, broken: &[BrokenLink]) {
    let ranked = rank_by_count(broken.iter().map(|link| return link.target.as_str()));

    let _ = writeln!(out, "\nTop {TOP_TARGETS} most common broken link targets:");
    for (target, count) in ranked.iter().take(TOP_TARGETS) {
        let _ = writeln!(out, "  {count:>3}x  {target}");
    }
}

/// Per-file breakdown of the first few files sorted by name — a different
/// ordering than the count ranking above, so small offenders still surface.
fn render_detail(out: &mut String, groups: &[(&Path, Vec<&BrokenLink>)]) {
    let mut by_name: Vec<&(&Path, Vec<&BrokenLink>)> = groups.iter().collect();
    by_name.sort_by(|a, b| return a.0.cmp(b.0));

    let _ = writeln!(out, "\nDetailed breakdown (first {DETAIL_FILES} files):");
    for (file, links) in by_name.iter().take(DETAIL_FILES) {
        let _ = writeln!(out, "\n  {}:", file.display());
        for link in links.iter().take(DETAIL_LINKS_PER_FILE) {
            let _ = writeln!(out, "    [{}]({})", link.text, link.target);
        }
        let remaining = links.len().saturating_sub(DETAIL_LINKS_PER_FILE);
        if remaining > 0 {
            let _ = writeln!(out, "    ... and {remaining} more");
        }
    }
}

/// Group broken links by source file, preserving first-encounter order of
/// the files and insertion order of each file's links.
fn group_by_file(broken: &[BrokenLink]) -> Vec<(&Path, Vec<&BrokenLink>)> {
    let mut index: HashMap<&Path, usize> = HashMap::new();
    let mut groups: Vec<(&Path, Vec<&BrokenLink>)> = Vec::new();

    for link in broken {
        let key = link.source.as_path();
        if let Some(&slot) = index.get(key) {
            if let Some((_, links)) = groups.get_mut(slot) {
                links.push(link);
            }
        } else {
            index.insert(key, groups.len());
            groups.push((key, vec![link]));
        }
    }

    groups
}

/// Count occurrences of each key and sort descending by count. First
/// encounter decides the order of equal counts because the sort is stable.
fn rank_by_count<K: Hash + Eq + Copy>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        if let Some(&slot) = index.get(&key) {
            if let Some(entry) = counts.get_mut(slot) {
                entry.1 = entry.1.saturating_add(1);
            }
        } else {
            index.insert(key, counts.len());
            counts.push((key, 1));
        }
    }

    counts.sort_by(|a, b| return b.1.cmp(&a.1));
    counts
}
