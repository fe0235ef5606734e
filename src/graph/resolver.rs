// src/graph/resolver.rs
//! Pure specifier-to-path resolution. A miss is a normal `None`, never an
//! error; callers decide whether a miss means "external" or "broken".

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Extension priority for JS/TS resolution. Order is the tie-break.
pub const JS_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Resolves a JS/TS import specifier to a file in `all_files`.
///
/// Bare specifiers (npm packages, node builtins) return `None` immediately;
/// the caller must record those as external, not broken. Relative and
/// absolute specifiers try, in order: exact match, each extension appended,
/// the `.js` to `.ts`/`.tsx` swap (source imports compiled names), and
/// `index.<ext>` under the specifier as a directory.
#[must_use]
pub fn resolve_js_import(
    specifier: &str,
    from_file: &Path,
    all_files: &HashSet<PathBuf>,
) -> Option<PathBuf> {
    if !specifier.starts_with('.') && !specifier.starts_with('/') {
        return None;
    }

    let dir = from_file.parent()?;
    let base = normalize(&dir.join(specifier));

    if all_files.contains(&base) {
        return Some(base);
    }

    for ext in JS_EXTENSIONS {
        let with_ext = append_extension(&base, ext);
        if all_files.contains(&with_ext) {
            return Some(with_ext);
        }
    }

    // TypeScript convention: the import says .js but the source file is .ts
    if base.extension().is_some_and(|e| e == "js") {
        for ext in ["ts", "tsx"] {
            let swapped = base.with_extension(ext);
            if all_files.contains(&swapped) {
                return Some(swapped);
            }
        }
    }

    for ext in JS_EXTENSIONS {
        let index_file = base.join(format!("index.{ext}"));
        if all_files.contains(&index_file) {
            return Some(index_file);
        }
    }

    None
}

/// Resolves a Python dotted module path against the project root.
/// `app.models.user` tries `app/models/user.py`, then the package form
/// `app/models/user/__init__.py`. No partial matching.
#[must_use]
pub fn resolve_python_import(
    module_path: &str,
    root_dir: &Path,
    all_files: &HashSet<PathBuf>,
) -> Option<PathBuf> {
    let mut base = root_dir.to_path_buf();
    for part in module_path.split('.') {
        base.push(part);
    }

    let file_path = append_extension(&base, "py");
    if all_files.contains(&file_path) {
        return Some(file_path);
    }

    let init_path = base.join("__init__.py");
    if all_files.contains(&init_path) {
        return Some(init_path);
    }

    None
}

/// Resolves a relative doc link against the linking file and checks the
/// result exists on disk. Existence only, no extension inference.
#[must_use]
pub fn resolve_relative_link(link_path: &str, from_file: &Path) -> Option<PathBuf> {
    let dir = from_file.parent()?;
    let resolved = normalize(&dir.join(link_path));
    if resolved.exists() {
        Some(resolved)
    } else {
        None
    }
}

/// Lexically collapses `.` and `..` components. Purely syntactic so that
/// candidate paths can be compared against the known-file set without
/// touching the disk. A `..` at the root of an absolute path is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !path.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> HashSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_normalize_collapses_parents() {
        assert_eq!(
            normalize(Path::new("/p/src/../docs/file.md")),
            PathBuf::from("/p/docs/file.md")
        );
        assert_eq!(normalize(Path::new("/p/./a")), PathBuf::from("/p/a"));
    }

    #[test]
    fn test_js_extension_priority() {
        // .ts wins over .js when both exist
        let all = files(&["/p/src/utils.ts", "/p/src/utils.js"]);
        let got = resolve_js_import("./utils", Path::new("/p/src/index.ts"), &all);
        assert_eq!(got, Some(PathBuf::from("/p/src/utils.ts")));
    }

    #[test]
    fn test_js_extension_swap() {
        let all = files(&["/p/src/utils.ts"]);
        let got = resolve_js_import("./utils.js", Path::new("/p/src/index.ts"), &all);
        assert_eq!(got, Some(PathBuf::from("/p/src/utils.ts")));
    }

    #[test]
    fn test_bare_specifier_is_not_local() {
        let all = files(&["/p/src/react.ts"]);
        assert_eq!(resolve_js_import("react", Path::new("/p/src/a.ts"), &all), None);
    }

    #[test]
    fn test_python_package_fallback() {
        let all = files(&["/p/app/models/__init__.py"]);
        let got = resolve_python_import("app.models", Path::new("/p"), &all);
        assert_eq!(got, Some(PathBuf::from("/p/app/models/__init__.py")));
    }
}
