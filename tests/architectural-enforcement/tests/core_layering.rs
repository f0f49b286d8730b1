//! Integration Test: Core Layering
//!
//! `galaxrx-core` is the headless half of the workspace. Surfaces and the
//! HTTP daemon depend on it, never the other way around, and it pulls in no
//! UI or HTTP framework.

use architectural_enforcement::{
    dependency_names, display_path, production_lines, read_source, rust_files, workspace_root,
};

/// Crates the core must not depend on
const FORBIDDEN_IN_CORE: &[&str] = &[
    "ratatui",
    "crossterm",
    "axum",
    "tower",
    "tower-http",
    "hyper",
    "galaxrx-tui",
    "galaxrx-server",
];

#[test]
fn test_core_manifest_has_no_ui_or_http_dependencies() {
    let manifest = read_source(&workspace_root().join("conductor/core/Cargo.toml"));
    assert!(!manifest.is_empty(), "core manifest not found");

    let deps = dependency_names(&manifest);
    let forbidden: Vec<_> = deps
        .iter()
        .filter(|d| FORBIDDEN_IN_CORE.contains(&d.as_str()))
        .collect();
    assert!(forbidden.is_empty(), "core depends on {forbidden:?}");
}

#[test]
fn test_core_sources_do_not_name_ui_crates() {
    let mut violations = Vec::new();

    for path in rust_files("conductor/core/src") {
        let source = read_source(&path);
        for line in production_lines(&source) {
            for name in ["ratatui", "crossterm", "axum", "galaxrx_tui", "galaxrx_server"] {
                if line.code.contains(&format!("{name}::")) {
                    violations.push(format!(
                        "{}:{} - {}",
                        display_path(&path),
                        line.number,
                        line.code.trim()
                    ));
                }
            }
        }
    }

    assert!(violations.is_empty(), "core references UI crates:\n{}", violations.join("\n"));
}

#[test]
fn test_surfaces_depend_on_core() {
    for manifest in ["tui/Cargo.toml", "conductor/daemon/Cargo.toml"] {
        let deps = dependency_names(&read_source(&workspace_root().join(manifest)));
        assert!(
            deps.iter().any(|d| d == "galaxrx-core"),
            "{manifest} does not depend on galaxrx-core"
        );
    }
}
