// tests/integration_clean.rs
use codesweep_core::clean::{self, CleanOptions};
use codesweep_core::progress::SilentProgress;
use codesweep_core::types::{
    Action, Category, Fix, FixKind, Issue, ScanReport, ScanStats, Severity,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn report_with(root: &Path, issues: Vec<Issue>) -> ScanReport {
    ScanReport {
        timestamp: 0,
        root_dir: root.to_path_buf(),
        duration_ms: 0,
        scanners: vec!["python".to_string()],
        issues,
        stats: ScanStats::default(),
    }
}

fn delete_issue(path: PathBuf) -> Issue {
    Issue {
        category: Category::DeadFile,
        severity: Severity::Warning,
        file_path: path,
        line: None,
        message: "File is not imported by any other file and not an entry point".to_string(),
        action: Action::Delete,
        fix: None,
        confidence: None,
        reason: None,
        trace: None,
    }
}

fn link_issue(path: PathBuf, markup: &str) -> Issue {
    Issue {
        category: Category::DocDrift,
        severity: Severity::Error,
        file_path: path,
        line: Some(1),
        message: format!("Link {markup} points to non-existent file"),
        action: Action::Update,
        fix: Some(Fix {
            kind: FixKind::RemoveLink,
            target: markup.to_string(),
        }),
        confidence: None,
        reason: None,
        trace: None,
    }
}

#[test]
fn test_dry_run_modifies_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let dead = root.join("dead.py");
    fs::write(&dead, "def unused():\n    pass\n").unwrap();

    let report = report_with(&root, vec![delete_issue(dead.clone())]);
    let summary = clean::run(&report, &CleanOptions { dry_run: true }, &SilentProgress).unwrap();

    assert_eq!(summary.deleted, 0);
    assert!(dead.exists());
}

#[test]
fn test_deletes_dead_file_and_clears_backup() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let dead = root.join("dead.py");
    fs::write(&dead, "def unused():\n    pass\n").unwrap();

    let report = report_with(&root, vec![delete_issue(dead.clone())]);
    let summary = clean::run(&report, &CleanOptions { dry_run: false }, &SilentProgress).unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.failed, 0);
    assert!(!summary.rolled_back);
    assert!(!dead.exists());
}

#[test]
fn test_removes_broken_link_keeps_text() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let readme = root.join("README.md");
    fs::write(&readme, "Read the [guide](missing.md) first.\n").unwrap();

    let report = report_with(&root, vec![link_issue(readme.clone(), "[guide](missing.md)")]);
    let summary = clean::run(&report, &CleanOptions { dry_run: false }, &SilentProgress).unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(
        fs::read_to_string(&readme).unwrap(),
        "Read the guide first.\n"
    );
}

#[test]
fn test_missing_file_is_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();

    let report = report_with(&root, vec![delete_issue(root.join("already-gone.py"))]);
    let summary = clean::run(&report, &CleanOptions { dry_run: false }, &SilentProgress).unwrap();

    assert_eq!(summary.skipped_missing, 1);
    assert_eq!(summary.deleted, 0);
}

#[test]
fn test_advisory_issues_are_untouched() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let file = root.join("util.py");
    fs::write(&file, "def helper():\n    pass\n").unwrap();

    let advisory = Issue {
        category: Category::UnusedExport,
        severity: Severity::Info,
        file_path: file.clone(),
        line: Some(1),
        message: "Export 'helper' (function) is never imported".to_string(),
        action: Action::Skip,
        fix: None,
        confidence: None,
        reason: None,
        trace: None,
    };
    let report = report_with(&root, vec![advisory]);
    let summary = clean::run(&report, &CleanOptions { dry_run: false }, &SilentProgress).unwrap();

    assert_eq!(summary.deleted + summary.updated, 0);
    assert!(file.exists());
}

#[test]
fn test_removes_python_import_line() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let app = root.join("app.py");
    fs::write(&app, "import os\nfrom missing import thing\nprint(os.name)\n").unwrap();

    let issue = Issue {
        category: Category::StaleReference,
        severity: Severity::Error,
        file_path: app.clone(),
        line: Some(2),
        message: "Import 'thing' from 'missing' cannot be resolved".to_string(),
        action: Action::Update,
        fix: Some(Fix {
            kind: FixKind::RemoveImport,
            target: "missing".to_string(),
        }),
        confidence: None,
        reason: None,
        trace: None,
    };
    let report = report_with(&root, vec![issue]);
    let summary = clean::run(&report, &CleanOptions { dry_run: false }, &SilentProgress).unwrap();

    assert_eq!(summary.updated, 1);
    let content = fs::read_to_string(&app).unwrap();
    assert!(!content.contains("from missing import thing"));
    assert!(content.contains("import os"));
}
