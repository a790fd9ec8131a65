//! Source-tree scans for layering checks.

use std::fs;
use std::path::{Path, PathBuf};

/// `(path relative to the crate root, 1-based line number, line)`.
pub type Hit = (String, usize, String);

/// Every `.rs` file under `dir`, in path order.
fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let mut pending = vec![dir.to_path_buf()];
    let mut files = Vec::new();
    while let Some(dir) = pending.pop() {
        let entries =
            fs::read_dir(&dir).unwrap_or_else(|e| panic!("read dir {}: {e}", dir.display()));
        for entry in entries {
            let path = entry
                .unwrap_or_else(|e| panic!("read entry in {}: {e}", dir.display()))
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// Lines under `relative_dir` (optionally only in `mod.rs` files) that `keep` selects.
fn scan(relative_dir: &str, mod_files_only: bool, keep: impl Fn(&str) -> bool) -> Vec<Hit> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut hits = Vec::new();

    for file in rust_sources(&root.join(relative_dir)) {
        if mod_files_only && file.file_name().and_then(|name| name.to_str()) != Some("mod.rs") {
            continue;
        }
        let content =
            fs::read_to_string(&file).unwrap_or_else(|e| panic!("read {}: {e}", file.display()));
        let shown = file
            .strip_prefix(&root)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");

        hits.extend(
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| keep(line))
                .map(|(idx, line)| (shown.clone(), idx + 1, line.to_string())),
        );
    }

    hits
}

/// Lines containing any of `patterns`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(relative_dir, false, |line| {
        patterns.iter().any(|pattern| line.contains(pattern))
    })
}

/// Lines in `mod.rs` files that are not blank, comments, `mod` items or `#[cfg`.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    scan(relative_dir, true, |raw| {
        let line = raw.trim();
        !(line.is_empty()
            || line.starts_with("//")
            || line.starts_with("pub mod ")
            || line.starts_with("mod ")
            || line.starts_with("#[cfg"))
    })
}
