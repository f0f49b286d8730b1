//! Result Pane Widget
//!
//! Draws a [`PaneContent`] projection: a loading line, the error card, or
//! the current result behind Summary / Table / Chart / Export tabs. All
//! content comes from `galaxrx_core::views`; nothing is computed here.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Row, StatefulWidget, Table,
    Tabs, Widget, Wrap,
};

use galaxrx_core::views::{
    self, KpiCard, PaneContent, ResultView, SummaryView, CHART_UNAVAILABLE, ERROR_HEADING,
    TABLE_UNAVAILABLE,
};
use galaxrx_core::TaskResponse;

use crate::display::DisplayExport;
use crate::theme::{self, BORDER_SLATE, ERROR_RED, FOREGROUND, GALAXRX_CYAN, MUTED};
use crate::widgets::text_block::{TextBlock, TextBlockState};

/// Shown before the first submission
pub const IDLE_HINT: &str = "Type a question and press Enter, or pick a suggestion with F1-F6.";

/// Shown while a request is in flight
pub const LOADING_TEXT: &str = "GALAXRX is analyzing your data...";

/// Lines of CSV shown in the export preview
const PREVIEW_LINES: usize = 6;

/// The result pane
pub struct ResultPane<'a> {
    content: PaneContent<'a>,
    last_export: Option<&'a DisplayExport>,
}

impl<'a> ResultPane<'a> {
    pub fn new(content: PaneContent<'a>) -> Self {
        Self {
            content,
            last_export: None,
        }
    }

    /// Mention the last written export on the Export tab
    pub fn last_export(mut self, export: Option<&'a DisplayExport>) -> Self {
        self.last_export = export;
        self
    }
}

fn panel(title: Span<'static>, border: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title)
}

fn muted(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(MUTED))
        .wrap(Wrap { trim: true })
}

impl StatefulWidget for ResultPane<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        match self.content {
            PaneContent::Hidden => {
                muted(IDLE_HINT)
                    .alignment(Alignment::Center)
                    .render(area, buf);
            }
            PaneContent::Loading => {
                let block = panel(Span::styled(" Result ", theme::title_style()), Style::default().fg(BORDER_SLATE));
                let inner = block.inner(area);
                block.render(area, buf);
                Paragraph::new(LOADING_TEXT)
                    .style(Style::default().fg(theme::LOADING_AMBER))
                    .alignment(Alignment::Center)
                    .render(inner, buf);
            }
            PaneContent::Error(message) => {
                let block = panel(
                    Span::styled(
                        format!(" {ERROR_HEADING} "),
                        Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
                    ),
                    Style::default().fg(ERROR_RED),
                );
                let inner = block.inner(area);
                block.render(area, buf);
                Paragraph::new(message)
                    .style(Style::default().fg(ERROR_RED))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
            }
            PaneContent::Result { response, view } => {
                let block = panel(
                    Span::styled(format!(" {} ", response.kind().label()), theme::title_style()),
                    Style::default().fg(BORDER_SLATE),
                );
                let inner = block.inner(area);
                block.render(area, buf);

                let [tabs_area, body] =
                    Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
                render_tabs(view, tabs_area, buf);

                match view {
                    ResultView::Summary => render_summary(response, body, buf, state),
                    ResultView::Table => render_table(response, body, buf),
                    ResultView::Chart => render_chart(response, body, buf),
                    ResultView::Export => render_export(response, self.last_export, body, buf),
                }
            }
        }
    }
}

fn render_tabs(view: ResultView, area: Rect, buf: &mut Buffer) {
    let titles: Vec<&str> = ResultView::ALL.iter().map(ResultView::label).collect();
    Tabs::new(titles)
        .select(view.index())
        .style(Style::default().fg(MUTED))
        .highlight_style(
            Style::default()
                .fg(GALAXRX_CYAN)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("|", Style::default().fg(BORDER_SLATE)))
        .render(area, buf);
}

fn render_summary(response: &TaskResponse, area: Rect, buf: &mut Buffer, state: &mut TextBlockState) {
    match views::summary(response) {
        SummaryView::Kpis(cards) => render_kpis(&cards, area, buf),
        SummaryView::Answer(text) => {
            TextBlock::new(&text)
                .style(Style::default().fg(FOREGROUND))
                .render(area, buf, state);
        }
        SummaryView::Placeholder(text) => muted(text).render(area, buf),
    }
}

fn render_kpis(cards: &[KpiCard], area: Rect, buf: &mut Buffer) {
    let card_height = area.height.min(4);
    let row = Rect { height: card_height, ..area };
    let slots = Layout::horizontal(cards.iter().map(|_| Constraint::Fill(1))).split(row);

    for (card, slot) in cards.iter().zip(slots.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_SLATE));
        let inner = block.inner(*slot);
        block.render(*slot, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(card.label, Style::default().fg(MUTED))),
            Line::from(Span::styled(
                card.value.clone(),
                Style::default().fg(FOREGROUND).add_modifier(Modifier::BOLD),
            )),
        ])
        .render(inner, buf);
    }
}

fn render_table(response: &TaskResponse, area: Rect, buf: &mut Buffer) {
    let Some(table) = views::table(response) else {
        muted(TABLE_UNAVAILABLE).render(area, buf);
        return;
    };

    let header = Row::new(table.headers.iter().copied())
        .style(Style::default().fg(GALAXRX_CYAN).add_modifier(Modifier::BOLD));
    let widths = vec![Constraint::Fill(1); table.headers.len()];
    let rows = table
        .rows
        .into_iter()
        .map(|cells| Row::new(cells).style(Style::default().fg(FOREGROUND)));

    Widget::render(
        Table::new(rows, widths).header(header).column_spacing(1),
        area,
        buf,
    );
}

fn render_chart(response: &TaskResponse, area: Rect, buf: &mut Buffer) {
    let Some(bars) = views::chart(response) else {
        muted(CHART_UNAVAILABLE).render(area, buf);
        return;
    };

    let bars: Vec<Bar> = bars
        .into_iter()
        .map(|bar| {
            Bar::default()
                .value(bar.value)
                .label(Line::from(bar.label))
                .style(Style::default().fg(GALAXRX_CYAN))
        })
        .collect();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .value_style(Style::default().fg(FOREGROUND).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(MUTED))
        .render(area, buf);
}

fn render_export(
    response: &TaskResponse,
    last_export: Option<&DisplayExport>,
    area: Rect,
    buf: &mut Buffer,
) {
    let mut lines = match views::export_csv(response) {
        Ok(Some(export)) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Ctrl+E", Style::default().fg(GALAXRX_CYAN).add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!(" writes {} ({} rows)", export.file_name, export.rows),
                        Style::default().fg(FOREGROUND),
                    ),
                ]),
                Line::default(),
            ];
            lines.extend(
                export
                    .contents
                    .lines()
                    .take(PREVIEW_LINES)
                    .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(MUTED)))),
            );
            lines
        }
        Ok(None) => vec![Line::from(Span::styled(
            "Nothing to export for this result.",
            Style::default().fg(MUTED),
        ))],
        Err(e) => vec![Line::from(Span::styled(
            format!("Export unavailable: {e}"),
            Style::default().fg(ERROR_RED),
        ))],
    };

    if let Some(export) = last_export {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Last export: {} ({} rows)", export.path.display(), export.rows),
            theme::notify_style(galaxrx_core::NotifyLevel::Success),
        )));
    }

    Paragraph::new(lines).render(area, buf);
}
