//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async functions in production code MUST NOT use blocking I/O.
//! **Required**: `tokio::fs`, `tokio::net`, `tokio::process`.
//!
//! Blocking calls are fine in plain functions that run before the runtime
//! starts or outside it (config loading, log file setup).

use architectural_enforcement::{display_path, production_lines, read_source, rust_files, PRODUCTION_DIRS};

/// Patterns that block the executor thread
const BLOCKING_PATTERNS: &[(&str, &str)] = &[
    ("std::fs::", "Blocking file I/O"),
    ("std::net::TcpStream", "Blocking network I/O"),
    ("std::net::TcpListener", "Blocking network I/O"),
    ("std::net::UdpSocket", "Blocking network I/O"),
    ("std::process::Command", "Blocking process I/O"),
    ("std::thread::sleep", "Blocking sleep"),
    ("reqwest::blocking", "Blocking HTTP client"),
];

#[test]
fn test_no_blocking_io_in_async_production_code() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for path in rust_files(dir) {
            let source = read_source(&path);
            for line in production_lines(&source) {
                if !line.in_async_fn {
                    continue;
                }
                for (pattern, kind) in BLOCKING_PATTERNS {
                    if line.code.contains(pattern) {
                        violations.push(format!(
                            "{}:{} - {}: {}",
                            display_path(&path),
                            line.number,
                            kind,
                            line.code.trim()
                        ));
                    }
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nBlocking I/O found in async production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nUse tokio::fs / tokio::net / tokio::time::sleep instead.");
        panic!(
            "\nFound {} blocking I/O violation(s) in production code.",
            violations.len()
        );
    }
}

#[test]
fn test_production_dirs_exist() {
    for dir in PRODUCTION_DIRS {
        assert!(
            !rust_files(dir).is_empty(),
            "{dir} has no Rust sources; the scan would pass vacuously"
        );
    }
}
