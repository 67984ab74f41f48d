//! Source-tree scans backing the layering contract tests.

use std::fs;
use std::path::{Path, PathBuf};

/// `(file, line number, line)` for every offending source line.
pub type Hits = Vec<(String, usize, String)>;

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn relative_path(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));

    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            walk(&path, files);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
}

/// All `.rs` files under `relative_dir`, sorted.
pub fn rust_sources(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Lines under `relative_dir` containing any of `patterns`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Hits {
    let mut hits = Vec::new();
    for file in rust_sources(relative_dir) {
        for (idx, line) in read(&file).lines().enumerate() {
            if patterns.iter().any(|p| line.contains(p)) {
                hits.push((relative_path(&file), idx + 1, line.to_string()));
            }
        }
    }
    hits
}

/// Lines in `mod.rs` files that are neither module declarations nor
/// re-exports.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Hits {
    let mut violations = Vec::new();
    for file in rust_sources(relative_dir) {
        if file.file_name().and_then(|s| s.to_str()) != Some("mod.rs") {
            continue;
        }

        for (idx, raw) in read(&file).lines().enumerate() {
            let line = raw.trim();
            let allowed = line.is_empty()
                || line.starts_with("//")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ")
                || line.starts_with("pub use ")
                || line.starts_with("#[cfg");
            if !allowed {
                violations.push((relative_path(&file), idx + 1, raw.to_string()));
            }
        }
    }
    violations
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}

pub fn read_relative(relative_path: &str) -> String {
    read(&root().join(relative_path))
}
