//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The core never
//! reads the clock at all; surfaces pass elapsed time to `Console::advance`.
//! **Exceptions**: Frame rate limiting (TUI app loop only), test code

use std::path::Path;

use architectural_enforcement::{production_lines, read, rust_files};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame rate limiting in tui/src/app.rs");
        eprintln!("  - Test code (#[cfg(test)] modules, tests/ directories)");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep to wait for boot lines or stage changes (schedule a timer)");
        eprintln!("  - Sleep in polling loops");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// The core is driven by virtual time only
#[test]
fn test_core_never_reads_the_clock() {
    let mut violations = Vec::new();
    for path in rust_files("bootfolio/core/src") {
        for (line, code) in production_lines(&read(&path)) {
            if code.contains("Instant::now") || code.contains("SystemTime::now") {
                violations.push(format!("{}:{line} - {}", path.display(), code.trim()));
            }
        }
    }
    assert!(violations.is_empty(), "core reads wall-clock time:\n{}", violations.join("\n"));
}

/// Find all sleep() calls in production code
fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();

    check_directory("tui/src", &mut violations, &SleepPolicy { allow_frame_limiting: true });
    check_directory(
        "bootfolio/core/src",
        &mut violations,
        &SleepPolicy { allow_frame_limiting: false },
    );

    violations
}

struct SleepPolicy {
    allow_frame_limiting: bool,
}

fn check_directory(dir: &str, violations: &mut Vec<String>, policy: &SleepPolicy) {
    for path in rust_files(dir) {
        check_file(&path, violations, policy);
    }
}

fn check_file(path: &Path, violations: &mut Vec<String>, policy: &SleepPolicy) {
    let content = read(path);
    let lines: Vec<&str> = content.lines().collect();

    for (line_number, code) in production_lines(&content) {
        if !(code.contains("::sleep(") || code.contains(".sleep(")) {
            continue;
        }

        // Frame limiting is only allowed in the TUI app loop
        if policy.allow_frame_limiting
            && path.ends_with("tui/src/app.rs")
            && is_frame_limiting_context(&lines, line_number - 1)
        {
            continue;
        }

        violations.push(format!("{}:{} - {}", path.display(), line_number, code.trim()));
    }
}

/// Check if sleep is used for frame rate limiting (acceptable in TUI)
fn is_frame_limiting_context(lines: &[&str], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    lines[context_range].iter().any(|line| {
        let line = line.to_lowercase();
        line.contains("frame") || line.contains("fps")
    })
}

#[test]
fn test_frame_limiting_detection() {
    let test_code = vec![
        "fn render_loop() {",
        "    let frame_duration = Duration::from_millis(50); // 20 FPS",
        "    loop {",
        "        render();",
        "        tokio::time::sleep(frame_duration).await;",
        "    }",
        "}",
    ];

    assert!(is_frame_limiting_context(&test_code, 4), "Should detect frame rate limiting");
}

#[test]
fn test_plain_sleep_is_not_frame_limiting() {
    let test_code = vec![
        "fn reveal_boot_line() {",
        "    std::thread::sleep(Duration::from_millis(800));",
        "    self.revealed += 1;",
        "}",
    ];

    assert!(!is_frame_limiting_context(&test_code, 1));
}
