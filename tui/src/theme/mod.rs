//! Theme and Colors
//!
//! GALAXRX palette: a dark slate background with cyan accents, matching the
//! web command bar.

use ratatui::style::{Color, Modifier, Style};

use galaxrx_core::{CommandBarStatus, NotifyLevel};

// ============================================================================
// Brand Palette
// ============================================================================

/// Accent cyan (focus ring, sparkle, selected tab)
pub const GALAXRX_CYAN: Color = Color::Rgb(34, 211, 238);

/// Softer cyan for secondary accents
pub const GALAXRX_CYAN_DIM: Color = Color::Rgb(103, 232, 249);

/// Panel border
pub const BORDER_SLATE: Color = Color::Rgb(71, 85, 105);

/// Muted foreground (placeholders, hints)
pub const MUTED: Color = Color::Rgb(148, 163, 184);

/// Primary foreground
pub const FOREGROUND: Color = Color::Rgb(226, 232, 240);

// ============================================================================
// Status Colors
// ============================================================================

/// Loading
pub const LOADING_AMBER: Color = Color::Rgb(251, 191, 36);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(74, 222, 128);

// ============================================================================
// Styles
// ============================================================================

/// Style for the command-bar status indicator
pub fn status_style(status: CommandBarStatus) -> Style {
    let color = match status {
        CommandBarStatus::Idle => MUTED,
        CommandBarStatus::Loading => LOADING_AMBER,
        CommandBarStatus::Success => SUCCESS_GREEN,
        CommandBarStatus::Error => ERROR_RED,
    };
    Style::default().fg(color)
}

/// Style for a notification line
pub fn notify_style(level: NotifyLevel) -> Style {
    let color = match level {
        NotifyLevel::Info => GALAXRX_CYAN_DIM,
        NotifyLevel::Warning => LOADING_AMBER,
        NotifyLevel::Error => ERROR_RED,
        NotifyLevel::Success => SUCCESS_GREEN,
    };
    Style::default().fg(color)
}

/// Style for a panel title
pub fn title_style() -> Style {
    Style::default()
        .fg(GALAXRX_CYAN)
        .add_modifier(Modifier::BOLD)
}
