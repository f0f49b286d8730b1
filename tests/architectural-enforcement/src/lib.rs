//! Architectural Enforcement Integration Tests
//!
//! Source-level checks run against the workspace's production code:
//! - No blocking I/O inside async functions
//! - Sleeps only where latency is simulated on purpose, or for frame pacing
//! - The core crate stays free of UI and HTTP frameworks
//!
//! The scanners here are line-based, not a Rust parser. They understand
//! `//` comments, `#[cfg(test)]` modules and brace nesting well enough for
//! this codebase's formatting.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["conductor/core/src", "conductor/daemon/src", "tui/src"];

/// Workspace root (two levels above this crate)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// Every `.rs` file under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Path shown in violation reports
pub fn display_path(path: &Path) -> String {
    let root = workspace_root();
    path.strip_prefix(&root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// One line of production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// 1-based line number
    pub number: usize,
    /// Line text with any `//` comment removed
    pub code: String,
    /// Whether the innermost enclosing function is `async`
    pub in_async_fn: bool,
}

/// Production lines of a source file
///
/// Scanning stops at the first `#[cfg(test)]`, which in this codebase always
/// opens the trailing test module.
pub fn production_lines(content: &str) -> Vec<CodeLine> {
    let mut lines = Vec::new();
    // (is_async, brace depth at which the body opened)
    let mut fn_stack: Vec<(bool, usize)> = Vec::new();
    let mut pending_fn: Option<bool> = None;
    let mut depth = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        let code = strip_comment(raw);

        if let Some(pos) = find_fn_keyword(code) {
            pending_fn = Some(code[..pos].contains("async"));
        }

        lines.push(CodeLine {
            number: idx + 1,
            code: code.to_string(),
            in_async_fn: fn_stack.last().is_some_and(|(is_async, _)| *is_async),
        });

        for c in code.chars() {
            match c {
                '{' => {
                    if let Some(is_async) = pending_fn.take() {
                        fn_stack.push((is_async, depth));
                    }
                    depth += 1;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    if fn_stack.last().is_some_and(|(_, open)| *open == depth) {
                        fn_stack.pop();
                    }
                }
                // trait method declaration without a body
                ';' => pending_fn = None,
                _ => {}
            }
        }
    }

    lines
}

/// Position of a `fn` keyword that starts a function item
fn find_fn_keyword(code: &str) -> Option<usize> {
    let trimmed = code.trim_start();
    let offset = code.len() - trimmed.len();
    let mut rest = trimmed;
    for prefix in ["pub(crate) ", "pub ", "async ", "const ", "unsafe "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
        }
    }
    if rest.starts_with("fn ") {
        Some(offset + (trimmed.len() - rest.len()))
    } else {
        None
    }
}

/// Drop a trailing `//` comment, ignoring `//` inside string literals
pub fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut prev = '\0';
    for (i, c) in line.char_indices() {
        match c {
            '"' if prev != '\\' => in_string = !in_string,
            '/' if !in_string && prev == '/' => return &line[..i - 1],
            _ => {}
        }
        prev = c;
    }
    line
}

/// Read a file, or an empty string when it cannot be read
pub fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// Dependency names declared in a Cargo.toml's `[dependencies]` table
pub fn dependency_names(manifest: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_deps = false;
    for line in manifest.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_deps = line == "[dependencies]";
            continue;
        }
        if !in_deps || line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((name, _)) = line.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_fn_tracking() {
        let src = r#"
fn setup() {
    std::fs::read_to_string("x");
}

pub async fn load() -> Result<()> {
    let x = tokio::fs::read("y").await;
    if x.is_ok() {
        std::fs::read("z");
    }
}

fn after() {}
"#;
        let lines = production_lines(src);
        let find = |needle: &str| lines.iter().find(|l| l.code.contains(needle)).unwrap();

        assert!(!find("read_to_string(\"x\")").in_async_fn);
        assert!(find("tokio::fs::read").in_async_fn);
        assert!(find("std::fs::read(\"z\")").in_async_fn);
        assert!(!find("fn after").in_async_fn);
    }

    #[test]
    fn test_trait_declarations_do_not_open_a_body() {
        let src = r#"
trait Exec {
    async fn run(&self);
}

fn plain() {
    std::fs::read("a");
}
"#;
        let lines = production_lines(src);
        let line = lines.iter().find(|l| l.code.contains("std::fs")).unwrap();
        assert!(!line.in_async_fn);
    }

    #[test]
    fn test_scanning_stops_at_test_module() {
        let src = "async fn a() {\n}\n#[cfg(test)]\nmod tests {\n    async fn t() { std::fs::read(\"x\"); }\n}\n";
        let lines = production_lines(src);
        assert!(lines.iter().all(|l| !l.code.contains("std::fs")));
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("let a = 1; // note"), "let a = 1; ");
        assert_eq!(strip_comment(r#"let url = "http://x";"#), r#"let url = "http://x";"#);
    }

    #[test]
    fn test_dependency_names() {
        let manifest = "[package]\nname = \"x\"\n\n[dependencies]\n# ui\nratatui = \"0.29\"\ntokio = { version = \"1\" }\n\n[dev-dependencies]\ntempfile = \"3\"\n";
        assert_eq!(dependency_names(manifest), vec!["ratatui", "tokio"]);
    }
}
