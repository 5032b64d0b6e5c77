//! Integration Test: Headless Core
//!
//! **Policy**: `bootfolio-core` holds all session state and MUST NOT depend
//! on terminal, rendering or async runtime crates. Surfaces depend on the
//! core, never the reverse.

use architectural_enforcement::{production_lines, read, rust_files, workspace_root};

const FORBIDDEN_CRATES: &[&str] = &["ratatui", "crossterm", "tokio", "futures"];

#[test]
fn test_core_manifest_has_no_surface_dependencies() {
    let manifest = read(&workspace_root().join("bootfolio/core/Cargo.toml"));
    assert!(!manifest.is_empty(), "core manifest not found");

    let violations: Vec<&str> = manifest
        .lines()
        .map(str::trim)
        .filter(|line| {
            FORBIDDEN_CRATES
                .iter()
                .any(|krate| line.starts_with(&format!("{krate} ")) || line.starts_with(&format!("{krate}=")))
        })
        .collect();

    assert!(
        violations.is_empty(),
        "bootfolio-core must stay headless, found:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_core_sources_do_not_use_surface_crates() {
    let mut violations = Vec::new();

    for path in rust_files("bootfolio/core/src") {
        for (line, code) in production_lines(&read(&path)) {
            for krate in FORBIDDEN_CRATES {
                if code.contains(&format!("{krate}::")) {
                    violations.push(format!("{}:{line} - {}", path.display(), code.trim()));
                }
            }
        }
    }

    assert!(violations.is_empty(), "core imports surface crates:\n{}", violations.join("\n"));
}

#[test]
fn test_no_panicking_shortcuts_in_production_code() {
    let mut violations = Vec::new();

    for dir in ["bootfolio/core/src", "tui/src"] {
        for path in rust_files(dir) {
            for (line, code) in production_lines(&read(&path)) {
                if code.contains(".unwrap()") || code.contains(".expect(") {
                    violations.push(format!("{}:{line} - {}", path.display(), code.trim()));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "propagate errors instead of unwrapping:\n{}",
        violations.join("\n")
    );
}
