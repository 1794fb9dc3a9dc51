use std::path::Path;
use std::process::Command;

fn linklint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_linklint"))
}

/// Write a file under `root`, creating parent directories as needed.
fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[test]
fn clean_tree_reports_all_valid() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "intro.md", "see [setup](guide/setup.md)");
    write(dir.path(), "guide/setup.md", "back to [intro](../intro.md)");

    let output = linklint_cmd().arg(dir.path()).output().unwrap();
    assert!(
        output.status.success(),
        "scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MARKDOWN LINK VALIDATION REPORT"));
    assert!(stdout.contains("Files scanned:        2"));
    assert!(stdout.contains("Total internal links: 2"));
    assert!(stdout.contains("All links are valid!"));
}

#[test]
fn broken_links_are_reported_but_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "[dead](missing.md) [ok](b.md)");
    write(dir.path(), "b.md", "fine");

    let output = linklint_cmd().arg(dir.path()).output().unwrap();
    // Reporting tool, not a gate: broken links still exit 0.
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Broken links:         1"));
    assert!(stdout.contains("Success rate:         50.0%"));
    assert!(stdout.contains("Files with broken links: 1"));
    assert!(stdout.contains("[dead](missing.md)"));
}

#[test]
fn missing_root_fails_without_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    let output = linklint_cmd().arg(&missing).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial report on a fatal error");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scan root not found"));
}

#[test]
fn external_only_corpus_has_no_links_and_a_defined_rate() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.md",
        "[site](https://example.com) [anchor](#top) [mail](mailto:a@b.c)",
    );

    let output = linklint_cmd().arg(dir.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total internal links: 0"));
    assert!(stdout.contains("Success rate:         N/A"));
}

#[test]
fn repeated_runs_render_identical_reports() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "[one](x.md) [two](y.md)");
    write(dir.path(), "b.md", "[three](x.md)");

    let first = linklint_cmd().arg(dir.path()).output().unwrap();
    let second = linklint_cmd().arg(dir.path()).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn json_output_carries_the_same_counts() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "[dead](missing.md) [ok](b.md)");
    write(dir.path(), "b.md", "fine");

    let output = linklint_cmd().arg(dir.path()).arg("--json").output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["files_scanned"], 2);
    assert_eq!(parsed["total_links"], 2);
    assert_eq!(parsed["broken"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["broken"][0]["target"], "missing.md");
    assert_eq!(parsed["broken"][0]["source"], "a.md");
}

#[test]
fn unreadable_file_is_logged_to_stderr_and_scan_continues() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00, 0xc0]).unwrap();
    write(dir.path(), "good.md", "[dead](missing.md)");

    let output = linklint_cmd().arg(dir.path()).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error processing"));
    assert!(stderr.contains("bad.md"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files scanned:        2"));
    assert!(stdout.contains("Broken links:         1"));
}

#[test]
fn config_excludes_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".linklint.toml", "exclude = [\"drafts\"]\n");
    write(dir.path(), "drafts/wip.md", "[dead](missing.md)");
    write(dir.path(), "a.md", "[ok](drafts/wip.md)");

    let output = linklint_cmd().arg(dir.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files scanned:        1"));
    assert!(stdout.contains("All links are valid!"));
}
