// tests/unit_scanner_javascript.rs
use codesweep_core::config::Config;
use codesweep_core::scanners::javascript::JavaScriptScanner;
use codesweep_core::scanners::ScannerPlugin;
use codesweep_core::types::{Category, Resolution, SymbolKind};
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
fn test_exports_and_import_resolution() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let index = write(
        &root,
        "src/index.ts",
        concat!(
            "import { helper } from \"./util\";\n",
            "import React from \"react\";\n",
            "export const VERSION = \"1\";\n",
            "export default function main() {}\n",
        ),
    );
    let util = write(&root, "src/util.ts", "export function helper() {}\n");

    let files = vec![index, util.clone()];
    let config = Config::new(root);
    let result = JavaScriptScanner.scan(&files, &files, &config);

    let version = result
        .exports
        .iter()
        .find(|e| e.name == "VERSION")
        .expect("VERSION exported");
    assert_eq!(version.kind, SymbolKind::Variable);

    let default = result
        .exports
        .iter()
        .find(|e| e.kind == SymbolKind::Default)
        .expect("default export");
    assert_eq!(default.name, "main");

    let helper = result
        .exports
        .iter()
        .find(|e| e.name == "helper")
        .expect("helper exported");
    assert_eq!(helper.kind, SymbolKind::Function);

    let local = result
        .imports
        .iter()
        .find(|i| i.from_module == "./util")
        .expect("relative import");
    assert_eq!(local.resolved, Some(Resolution::Local(util)));

    let react = result
        .imports
        .iter()
        .find(|i| i.from_module == "react")
        .expect("package import");
    assert_eq!(react.resolved, Some(Resolution::External));
}

#[test]
fn test_unresolved_relative_import_is_broken() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let index = write(&root, "index.ts", "import { gone } from \"./missing\";\n");

    let files = vec![index];
    let config = Config::new(root);
    let result = JavaScriptScanner.scan(&files, &files, &config);

    let import = result
        .imports
        .iter()
        .find(|i| i.from_module == "./missing")
        .expect("import recorded");
    assert_eq!(import.resolved, None);
}

#[test]
fn test_package_json_unused_dependency() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let index = write(&root, "index.ts", "import React from \"react\";\n");
    let pkg = write(
        &root,
        "package.json",
        r#"{
  "dependencies": { "react": "^18.0.0", "lodash": "^4.17.0" },
  "devDependencies": { "typescript": "^5.0.0", "@types/node": "^20.0.0" }
}"#,
    );

    let js_files = vec![index];
    let all_files = vec![js_files[0].clone(), pkg];
    let config = Config::new(root);
    let result = JavaScriptScanner.scan(&js_files, &all_files, &config);

    let unused: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::UnusedDependency)
        .collect();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].message.contains("'lodash'"));
}

#[test]
fn test_export_count_threshold() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let index = write(
        &root,
        "index.ts",
        "export const a = 1;\nexport const b = 2;\nexport const c = 3;\n",
    );

    let files = vec![index];
    let mut config = Config::new(root);
    config.thresholds.max_exports = 2;
    let result = JavaScriptScanner.scan(&files, &files, &config);

    let modularity: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == Category::Modularity)
        .collect();
    assert_eq!(modularity.len(), 1);
    assert!(modularity[0].message.contains("3 exports"));
}
