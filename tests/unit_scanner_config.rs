// tests/unit_scanner_config.rs
use codesweep_core::config::Config;
use codesweep_core::scanners::config::ConfigScanner;
use codesweep_core::scanners::ScannerPlugin;
use codesweep_core::types::{Category, Severity};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(root: &std::path::Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_docker_compose_empty_build_context() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let compose = write(
        &root,
        "docker-compose.yml",
        concat!(
            "services:\n",
            "  web:\n",
            "    build: ./web\n",
            "  api:\n",
            "    build:\n",
            "      context: ./api\n",
        ),
    );
    let web_main = write(&root, "web/main.py", "print('hi')\n");

    let cfg_files = vec![compose];
    let all_files = vec![cfg_files[0].clone(), web_main];
    let config = Config::new(root);
    let result = ConfigScanner.scan(&cfg_files, &all_files, &config);

    let stale: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::StaleReference)
        .collect();
    assert_eq!(stale.len(), 1);
    assert!(stale[0].message.contains("'api'"));
    assert!(stale[0].message.contains("'./api'"));
    assert_eq!(stale[0].severity, Severity::Warning);
}

#[test]
fn test_env_example_unreferenced_key() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let env_example = write(
        &root,
        ".env.example",
        "# keys\nDATABASE_URL=postgres://localhost\nUNUSED_KEY=1\n",
    );
    let settings = write(
        &root,
        "config.py",
        "import os\nurl = os.environ['DATABASE_URL']\n",
    );

    let cfg_files = vec![env_example];
    let all_files = vec![cfg_files[0].clone(), settings];
    let config = Config::new(root);
    let result = ConfigScanner.scan(&cfg_files, &all_files, &config);

    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::Info);
    assert!(result.issues[0].message.contains("'UNUSED_KEY'"));
}

#[test]
fn test_malformed_yaml_is_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let compose = write(&root, "docker-compose.yml", "services: [unclosed\n");

    let cfg_files = vec![compose];
    let all_files = cfg_files.clone();
    let config = Config::new(root);
    let result = ConfigScanner.scan(&cfg_files, &all_files, &config);

    assert!(result.issues.is_empty());
}
