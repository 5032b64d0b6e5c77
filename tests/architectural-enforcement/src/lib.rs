//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core crate stays headless (no terminal or runtime crates)
//! - No sleep() calls in production code; time only moves through `advance`
//! - No panicking shortcuts in production code
//!
//! These tests are designed to catch violations early in the development cycle.
//! The helpers here locate the workspace and walk its production sources.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Every `.rs` file under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Production lines of a source file as `(line_number, code)`
///
/// Comments after `//` are dropped and scanning stops at the first
/// `#[cfg(test)]`, since test modules sit at the end of each file.
pub fn production_lines(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| (idx + 1, line.split("//").next().unwrap_or(line).to_string()))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Read a file, or an empty string when it cannot be read
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let src = "fn a() {}\n// note\nlet x = 1; // trailing\n#[cfg(test)]\nmod tests { fn b() { x.unwrap() } }\n";
        let lines = production_lines(src);
        assert_eq!(lines, vec![(1, "fn a() {}".to_string()), (3, "let x = 1; ".to_string())]);
    }

    #[test]
    fn test_workspace_root_holds_members() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").exists());
        assert!(root.join("bootfolio/core/src").exists());
        assert!(!rust_files("tui/src").is_empty());
    }
}
