//! Integration Test: Sleep Allowlist
//!
//! **Policy**: production code sleeps only where waiting is the feature:
//! - the mock executor's simulated task latency
//! - the contact endpoint's simulated processing delay
//! - the TUI frame tick
//!
//! Anything else that wants to wait should wait on I/O or a channel.

use architectural_enforcement::{display_path, production_lines, read_source, rust_files, PRODUCTION_DIRS};

/// Files allowed to call `tokio::time::sleep`
const SLEEP_ALLOWED: &[&str] = &[
    "conductor/core/src/backend/mock.rs",
    "conductor/daemon/src/server.rs",
    "tui/src/app.rs",
];

#[test]
fn test_sleep_only_in_allowed_files() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for path in rust_files(dir) {
            let shown = display_path(&path);
            let allowed = SLEEP_ALLOWED.iter().any(|a| shown.ends_with(a));
            let source = read_source(&path);

            for line in production_lines(&source) {
                let sleeps = line.code.contains("::sleep(") || line.code.contains(".sleep(");
                if sleeps && !allowed {
                    violations.push(format!("{}:{} - {}", shown, line.number, line.code.trim()));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nSleep calls outside the allowlist:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!("\nFound {} sleep violation(s) in production code.", violations.len());
    }
}

#[test]
fn test_allowlisted_files_exist() {
    let root = architectural_enforcement::workspace_root();
    for file in SLEEP_ALLOWED {
        assert!(root.join(file).exists(), "allowlisted file {file} is gone");
    }
}
