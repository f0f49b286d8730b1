//! Command Bar Widgets
//!
//! The input box, the suggestion shortcuts beneath it and the recent-query
//! strip.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use galaxrx_core::{CommandBarStatus, SUGGESTIONS};

use crate::theme::{self, BORDER_SLATE, FOREGROUND, GALAXRX_CYAN, MUTED};

/// Shown while the input is empty
pub const INPUT_PLACEHOLDER: &str = "Ask GALAXRX to optimize your pharmacy… (F1-F6 for ideas)";

/// Longest suffix of `text` that fits in `width` columns
pub fn visible_tail(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// The input box
pub struct CommandBar<'a> {
    input: &'a str,
    status: CommandBarStatus,
}

impl<'a> CommandBar<'a> {
    pub fn new(input: &'a str, status: CommandBarStatus) -> Self {
        Self { input, status }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.status == CommandBarStatus::Loading {
            theme::status_style(self.status)
        } else {
            Style::default().fg(GALAXRX_CYAN)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(" ✦ Ask GALAXRX ", theme::title_style()))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.status.description()),
                    theme::status_style(self.status),
                ))
                .right_aligned(),
            );

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        // "> " prompt plus trailing cursor
        let room = (inner.width as usize).saturating_sub(3);
        let line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(GALAXRX_CYAN)),
                Span::styled(
                    visible_tail(INPUT_PLACEHOLDER, room).to_string(),
                    Style::default().fg(MUTED),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(GALAXRX_CYAN)),
                Span::styled(
                    visible_tail(self.input, room).to_string(),
                    Style::default().fg(FOREGROUND),
                ),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        };
        Paragraph::new(line).render(inner, buf);
    }
}

/// Suggestion shortcuts, one per function key
pub struct Suggestions;

impl Widget for Suggestions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(SUGGESTIONS.len() * 2);
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            spans.push(Span::styled(
                format!(" F{} ", i + 1),
                Style::default().fg(GALAXRX_CYAN).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{}  ", suggestion.text),
                Style::default().fg(MUTED),
            ));
        }
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Recent queries, most recent first
pub struct RecentStrip<'a> {
    entries: &'a [String],
    selected: Option<usize>,
}

impl<'a> RecentStrip<'a> {
    pub fn new(entries: &'a [String], selected: Option<usize>) -> Self {
        Self { entries, selected }
    }
}

impl Widget for RecentStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.entries.is_empty() {
            return;
        }
        let mut spans = vec![Span::styled(" Recent ↑↓: ", Style::default().fg(BORDER_SLATE))];
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", Style::default().fg(BORDER_SLATE)));
            }
            let style = if self.selected == Some(i) {
                Style::default()
                    .fg(GALAXRX_CYAN)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(MUTED)
            };
            spans.push(Span::styled(entry.clone(), style));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_visible_tail_fits() {
        assert_eq!(visible_tail("forecast", 20), "forecast");
        assert_eq!(visible_tail("forecast demand", 6), "demand");
        assert_eq!(visible_tail("", 0), "");
    }

    #[test]
    fn test_visible_tail_wide_chars() {
        // each CJK char is two columns wide
        assert_eq!(visible_tail("在庫在庫", 5), "在庫");
    }

    #[test]
    fn test_command_bar_shows_input_and_status() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        CommandBar::new("forecast", CommandBarStatus::Loading).render(area, &mut buf);

        assert!(row(&buf, 0).contains("Analyzing..."));
        assert!(row(&buf, 1).contains("> forecast_"));
    }

    #[test]
    fn test_command_bar_placeholder() {
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        CommandBar::new("", CommandBarStatus::Idle).render(area, &mut buf);

        assert!(row(&buf, 1).contains("Ask GALAXRX to optimize"));
        assert!(row(&buf, 0).contains("Ready"));
    }

    #[test]
    fn test_recent_strip_lists_entries() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let entries = vec!["shelf".to_string(), "forecast".to_string()];
        RecentStrip::new(&entries, None).render(area, &mut buf);

        assert!(row(&buf, 0).contains("shelf · forecast"));
    }
}
