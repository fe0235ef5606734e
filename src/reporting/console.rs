// src/reporting/console.rs
use crate::types::{Category, Confidence, Issue, ScanReport, Severity};
use colored::Colorize;
use std::path::Path;

const CATEGORY_ORDER: &[Category] = &[
    Category::DeadFile,
    Category::StaleReference,
    Category::UnusedDependency,
    Category::UnusedExport,
    Category::DocDrift,
    Category::Modularity,
];

fn category_title(category: Category) -> &'static str {
    match category {
        Category::DeadFile => "Dead files",
        Category::StaleReference => "Stale references",
        Category::UnusedDependency => "Unused dependencies",
        Category::UnusedExport => "Unused exports",
        Category::DocDrift => "Doc drift",
        Category::Modularity => "Modularity",
    }
}

/// Prints a formatted scan report to stdout, grouped by category with
/// severity coloring, confidence tags, and dependency traces.
pub fn print_report(report: &ScanReport) {
    for &category in CATEGORY_ORDER {
        print_category(report, category);
    }
    print_summary(report);
}

/// Prints a single category's findings, used for `report --detail`.
pub fn print_category(report: &ScanReport, category: Category) {
    let issues: Vec<&Issue> = report
        .issues
        .iter()
        .filter(|i| i.category == category)
        .collect();
    if issues.is_empty() {
        return;
    }

    println!();
    println!("{} ({})", category_title(category).bold(), issues.len());
    for issue in issues {
        print_issue(issue, &report.root_dir);
    }
}

fn print_issue(issue: &Issue, root: &Path) {
    let rel = issue
        .file_path
        .strip_prefix(root)
        .unwrap_or(&issue.file_path);
    let location = match issue.line {
        Some(line) => format!("{}:{line}", rel.display()),
        None => rel.display().to_string(),
    };

    let tag = match issue.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".dimmed(),
    };

    println!("  {tag} {} {}", location.blue(), issue.message);

    if let (Some(confidence), Some(reason)) = (issue.confidence, issue.reason.as_deref()) {
        let line = format!("confidence: {confidence} - {reason}");
        match confidence {
            Confidence::High => println!("    {}", line.yellow()),
            Confidence::Medium | Confidence::Low => println!("    {}", line.dimmed()),
        }
    }

    if let Some(trace) = &issue.trace {
        let route: Vec<String> = trace
            .iter()
            .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
            .collect();
        println!("    {}", format!("via: {}", route.join(" -> ")).dimmed());
    }
}

fn print_summary(report: &ScanReport) {
    let errors = report.count_by_severity(Severity::Error);
    let warnings = report.count_by_severity(Severity::Warning);
    let duration = report.duration_ms;

    println!();
    if errors == 0 && warnings == 0 {
        println!(
            "{} Scanned {} files in {duration}ms. No problems found.",
            "OK".green().bold(),
            report.stats.files_scanned
        );
        return;
    }

    let mut parts: Vec<String> = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} {}", pluralize("error", errors)));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} {}", pluralize("warning", warnings)));
    }
    let summary = parts.join(", ");

    let badge = if errors > 0 {
        "X".red().bold()
    } else {
        "~".yellow().bold()
    };
    println!(
        "{badge} Found {summary} across {} files ({duration}ms).",
        report.stats.files_scanned
    );
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
