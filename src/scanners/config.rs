// src/scanners/config.rs
//! Structured-config scanner: docker-compose build contexts that point at
//! empty directories, and `.env.example` keys no configuration file
//! mentions.

use crate::config::Config;
use crate::graph::resolver::normalize;
use crate::scanners::ScannerPlugin;
use crate::types::{Action, Category, Issue, ScanResult, Severity};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigScanner;

impl ScannerPlugin for ConfigScanner {
    fn name(&self) -> &'static str {
        "config"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".yml", ".yaml", ".env", ".json", ".example"]
    }

    fn scan(&self, files: &[PathBuf], all_files: &[PathBuf], _config: &Config) -> ScanResult {
        let mut result = ScanResult {
            files: files.to_vec(),
            ..ScanResult::default()
        };

        for file in files {
            let name = file.file_name().map_or("", |n| n.to_str().unwrap_or(""));
            if name == "docker-compose.yml" || name == "docker-compose.yaml" {
                scan_docker_compose(file, all_files, &mut result.issues);
            }
            if name == ".env.example" {
                scan_env_example(file, all_files, &mut result.issues);
            }
        }

        result
    }
}

/// Each service with a `build` context (string or object form) must have at
/// least one discovered file under the resolved directory.
fn scan_docker_compose(file: &Path, all_files: &[PathBuf], issues: &mut Vec<Issue>) {
    let Ok(content) = fs::read_to_string(file) else {
        return;
    };
    // Malformed YAML is an extraction failure: skip the file.
    let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(&content) else {
        return;
    };
    let Some(services) = doc.get("services").and_then(|s| s.as_mapping()) else {
        return;
    };

    for (service_name, service) in services {
        let Some(build_ctx) = build_context(service) else {
            continue;
        };
        let Some(dir) = file.parent() else {
            continue;
        };
        let build_dir = normalize(&dir.join(&build_ctx));

        let has_files = all_files.iter().any(|f| f.starts_with(&build_dir));
        if !has_files {
            let service_name = service_name.as_str().unwrap_or("?");
            issues.push(Issue {
                category: Category::StaleReference,
                severity: Severity::Warning,
                file_path: file.to_path_buf(),
                line: None,
                message: format!(
                    "Service '{service_name}' references build context '{build_ctx}' but directory has no files"
                ),
                action: Action::Skip,
                fix: None,
                confidence: None,
                reason: None,
                trace: None,
            });
        }
    }
}

fn build_context(service: &serde_yaml::Value) -> Option<String> {
    let build = service.get("build")?;
    if let Some(s) = build.as_str() {
        return Some(s.to_string());
    }
    build.get("context")?.as_str().map(str::to_string)
}

/// Every declared key must appear as a literal substring somewhere in the
/// concatenated app-configuration files. Deliberately a raw substring check:
/// it mirrors how env keys are referenced across languages without parsing.
fn scan_env_example(file: &Path, all_files: &[PathBuf], issues: &mut Vec<Issue>) {
    let Ok(content) = fs::read_to_string(file) else {
        return;
    };

    let mut keys: Vec<String> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let key = trimmed.split('=').next().unwrap_or("").trim();
        if !key.is_empty() {
            keys.push(key.to_string());
        }
    }

    let config_files = all_files.iter().filter(|f| {
        let s = f.to_string_lossy();
        s.ends_with("config.py")
            || s.ends_with("config.ts")
            || s.ends_with("config.js")
            || s.ends_with(".env")
            || s.contains("settings")
    });

    let mut all_config_content = String::new();
    for f in config_files {
        if let Ok(c) = fs::read_to_string(f) {
            all_config_content.push_str(&c);
            all_config_content.push('\n');
        }
    }

    for key in keys {
        if !all_config_content.contains(&key) {
            issues.push(Issue {
                category: Category::StaleReference,
                severity: Severity::Info,
                file_path: file.to_path_buf(),
                line: None,
                message: format!(
                    "Environment variable '{key}' in .env.example is not referenced in any config file"
                ),
                action: Action::Skip,
                fix: None,
                confidence: None,
                reason: None,
                trace: None,
            });
        }
    }
}
