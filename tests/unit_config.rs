// tests/unit_config.rs
use codesweep_core::config::{default_config_toml, Config, CONFIG_FILE, IGNORE_FILE};
use codesweep_core::discovery::discover;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults_without_config_file() {
    let dir = tempdir().unwrap();
    let config = Config::load(dir.path());

    assert!(config.include.is_empty());
    assert!(config.exclude.is_empty());
    assert!(config.entry_points.is_empty());
    assert!(config.scanners.python);
    assert!(config.scanners.css);
    assert_eq!(config.thresholds.max_file_lines, 500);
    assert_eq!(config.thresholds.max_exports, 10);
}

#[test]
fn test_partial_config_merges_over_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        concat!(
            "exclude = [\"legacy/\"]\n",
            "entry_points = [\"scripts/run.py\"]\n",
            "\n",
            "[scanners]\n",
            "css = false\n",
            "\n",
            "[thresholds]\n",
            "max_file_lines = 100\n",
        ),
    )
    .unwrap();

    let config = Config::load(dir.path());

    assert_eq!(config.exclude, vec!["legacy/".to_string()]);
    assert_eq!(config.entry_points, vec!["scripts/run.py".to_string()]);
    assert!(!config.scanners.css);
    assert!(config.scanners.python);
    assert_eq!(config.thresholds.max_file_lines, 100);
    assert_eq!(config.thresholds.max_exports, 10);
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "include = [unclosed\n").unwrap();

    let config = Config::load(dir.path());

    assert!(config.include.is_empty());
    assert!(config.scanners.javascript);
}

#[test]
fn test_unknown_field_rejects_whole_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "exclude = [\"x\"]\ntypo_field = true\n",
    )
    .unwrap();

    let config = Config::load(dir.path());

    // Strict parsing: a typo does not silently half-apply.
    assert!(config.exclude.is_empty());
}

#[test]
fn test_zero_threshold_uses_default() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[thresholds]\nmax_file_lines = 0\n",
    )
    .unwrap();

    let config = Config::load(dir.path());

    assert_eq!(config.thresholds.max_file_lines, 500);
}

#[test]
fn test_ignore_file_appends_exclusions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "exclude = [\"legacy/\"]\n").unwrap();
    fs::write(
        dir.path().join(IGNORE_FILE),
        "# generated output\n\nvendor/\nsnapshots/\n",
    )
    .unwrap();

    let config = Config::load(dir.path());

    assert_eq!(
        config.exclude,
        vec![
            "legacy/".to_string(),
            "vendor/".to_string(),
            "snapshots/".to_string(),
        ]
    );
}

#[test]
fn test_ignore_file_patterns_filter_discovery() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
    fs::write(dir.path().join("vendor/lib.py"), "def f():\n    pass\n").unwrap();
    fs::write(dir.path().join(IGNORE_FILE), "vendor/\n").unwrap();

    let config = Config::load(dir.path());
    let files = discover(&config).unwrap();

    assert!(files.iter().any(|f| f.ends_with("main.py")));
    assert!(!files.iter().any(|f| f.ends_with("vendor/lib.py")));
}

#[test]
fn test_starter_config_round_trips() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), default_config_toml()).unwrap();

    let config = Config::load(dir.path());

    assert!(config.scanners.markdown);
    assert_eq!(config.thresholds.max_exports, 10);
}
