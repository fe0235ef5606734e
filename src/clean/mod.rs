// src/clean/mod.rs
//! Cleanup workflow: applies actionable issues from a scan report as a
//! single transactional batch. Every touched file is snapshotted first; any
//! failure rolls the whole batch back best-effort.

pub mod files;
pub mod imports;
pub mod links;

use crate::backup::BackupManager;
use crate::error::Result;
use crate::progress::Progress;
use crate::types::{Action, FixKind, Issue, ScanReport};
use colored::Colorize;

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Print the plan without touching any file.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanSummary {
    pub deleted: usize,
    pub updated: usize,
    pub failed: usize,
    /// Actionable issues whose file vanished between scan and clean.
    pub skipped_missing: usize,
    pub rolled_back: bool,
}

/// Applies every actionable (`delete`/`update`) issue in the report.
///
/// # Errors
/// Returns error only on backup-infrastructure failures; per-issue apply
/// failures are counted and trigger rollback instead.
pub fn run(
    report: &ScanReport,
    options: &CleanOptions,
    progress: &dyn Progress,
) -> Result<CleanSummary> {
    let mut summary = CleanSummary::default();

    let actionable: Vec<&Issue> = report
        .issues
        .iter()
        .filter(|i| i.action != Action::Skip)
        .collect();

    if actionable.is_empty() {
        progress.succeed("No actionable issues to clean.");
        return Ok(summary);
    }

    // Pre-flight: the scan may be stale.
    let (valid, missing): (Vec<&Issue>, Vec<&Issue>) = actionable
        .into_iter()
        .partition(|i| i.file_path.exists());
    summary.skipped_missing = missing.len();
    if !missing.is_empty() {
        progress.warn(&format!(
            "{} file(s) no longer exist since scan - skipping them",
            missing.len()
        ));
    }
    if valid.is_empty() {
        progress.info("All actionable files have been moved or deleted. Nothing to do.");
        return Ok(summary);
    }

    print_plan(&valid, report);

    if options.dry_run {
        progress.info("Dry run - no files were modified.");
        return Ok(summary);
    }

    let mut backup = BackupManager::new(&report.root_dir);

    for issue in &valid {
        match apply_issue(issue, &mut backup) {
            Ok(Applied::Deleted) => summary.deleted += 1,
            Ok(Applied::Updated) => summary.updated += 1,
            Ok(Applied::Nothing) => {}
            Err(e) => {
                progress.warn(&format!(
                    "Failed to fix {}: {e}",
                    issue.file_path.display()
                ));
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        let (restored, failed) = backup.restore_all();
        summary.rolled_back = true;
        progress.warn(&format!(
            "{} failure(s) - rolled back {restored} file(s) ({failed} could not be restored)",
            summary.failed
        ));
    } else {
        progress.succeed(&format!(
            "Cleaned {} file(s): {} deleted, {} updated",
            summary.deleted + summary.updated,
            summary.deleted,
            summary.updated
        ));
        backup.cleanup();
    }

    Ok(summary)
}

enum Applied {
    Deleted,
    Updated,
    Nothing,
}

fn apply_issue(issue: &Issue, backup: &mut BackupManager) -> Result<Applied> {
    match issue.action {
        Action::Delete => {
            backup.backup(&issue.file_path)?;
            files::delete_file(&issue.file_path)?;
            Ok(Applied::Deleted)
        }
        Action::Update => {
            let Some(fix) = &issue.fix else {
                return Ok(Applied::Nothing);
            };
            backup.backup(&issue.file_path)?;
            let changed = match fix.kind {
                FixKind::RemoveImport => imports::remove_import_line(&issue.file_path, &fix.target)?,
                FixKind::RemoveLink => links::remove_broken_link(&issue.file_path, &fix.target)?,
                FixKind::RemoveDependency => {
                    imports::remove_dependency_line(&issue.file_path, &fix.target)?
                }
            };
            Ok(if changed { Applied::Updated } else { Applied::Nothing })
        }
        Action::Skip => Ok(Applied::Nothing),
    }
}

fn print_plan(issues: &[&Issue], report: &ScanReport) {
    let deletes: Vec<&&Issue> = issues.iter().filter(|i| i.action == Action::Delete).collect();
    let updates: Vec<&&Issue> = issues.iter().filter(|i| i.action == Action::Update).collect();

    println!();
    println!("{}", "Cleanup plan:".bold());

    if !deletes.is_empty() {
        println!("{}", format!("DELETE ({} files):", deletes.len()).red().bold());
        for issue in deletes {
            let rel = issue
                .file_path
                .strip_prefix(&report.root_dir)
                .unwrap_or(&issue.file_path);
            println!("  {} {} -- {}", "x".red(), rel.display(), issue.message);
        }
    }

    if !updates.is_empty() {
        println!("{}", format!("UPDATE ({} files):", updates.len()).yellow().bold());
        for issue in updates {
            let rel = issue
                .file_path
                .strip_prefix(&report.root_dir)
                .unwrap_or(&issue.file_path);
            println!("  {} {} -- {}", "~".yellow(), rel.display(), issue.message);
        }
    }
    println!();
}
