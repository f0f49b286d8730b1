//! Result Views
//!
//! Pure projections of the current result into what a surface draws. Nothing
//! here holds state or touches the terminal; a surface asks for the
//! [`PaneContent`] of the conductor's status and renders whichever view is
//! selected.
//!
//! # Views
//!
//! - **Summary**: KPI cards for business analysis, the answer text for the
//!   assistant, a placeholder line otherwise
//! - **Table**: forecast, stock and promotion rows; other kinds have no table
//! - **Chart**: one bar per forecast row; forecasts only
//! - **Export**: CSV of the response's list field (see [`export`])

pub mod export;
pub mod format;

pub use export::{export_csv, export_file_name, write_export, CsvExport, ExportError, EXPORT_FIELDS};

use crate::messages::CommandBarStatus;
use crate::response::{Kpis, TaskResponse};
use format::{fixed, grouped_number, plain_number};

/// Summary line shown for kinds without a dedicated summary
pub const SUMMARY_PLACEHOLDER: &str =
    "This view provides a high-level summary. Switch to the Table or Chart view for more details.";

/// Shown in the table view for kinds without a table
pub const TABLE_UNAVAILABLE: &str = "Table view is not available for this result.";

/// Shown in the chart view for anything but forecasts
pub const CHART_UNAVAILABLE: &str = "Chart view is only available for forecasts.";

/// Heading above an error message
pub const ERROR_HEADING: &str = "An Error Occurred";

/// Which projection of a result is selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultView {
    /// High-level summary
    #[default]
    Summary,
    /// Rows and columns
    Table,
    /// Bar chart
    Chart,
    /// CSV download
    Export,
}

impl ResultView {
    /// Views in tab order
    pub const ALL: [ResultView; 4] = [Self::Summary, Self::Table, Self::Chart, Self::Export];

    /// Tab label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Table => "Table",
            Self::Chart => "Chart",
            Self::Export => "Export",
        }
    }

    /// Position in [`ResultView::ALL`]
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Summary => 0,
            Self::Table => 1,
            Self::Chart => 2,
            Self::Export => 3,
        }
    }

    /// Next tab, wrapping
    #[must_use]
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping
    #[must_use]
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for ResultView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One headline figure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KpiCard {
    /// Card label
    pub label: &'static str,
    /// Formatted value
    pub value: String,
}

/// Content of the summary view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummaryView {
    /// KPI cards, in display order
    Kpis(Vec<KpiCard>),
    /// Assistant answer text
    Answer(String),
    /// Generic line for other kinds
    Placeholder(&'static str),
}

/// Content of the table view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    /// Column headings
    pub headers: Vec<&'static str>,
    /// Formatted cells, one vector per row
    pub rows: Vec<Vec<String>>,
}

/// One bar of the chart view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartBar {
    /// Axis label (`ILC <ilc>`)
    pub label: String,
    /// Bar height
    pub value: u64,
}

/// What the result pane shows for a given status
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaneContent<'a> {
    /// Idle: the pane is not drawn
    Hidden,
    /// Request in flight
    Loading,
    /// Last request failed
    Error(&'a str),
    /// A result with the selected view
    Result {
        /// Current result
        response: &'a TaskResponse,
        /// Selected projection
        view: ResultView,
    },
}

/// Project the conductor's status onto the pane
///
/// A `Success` status without a response (never produced by the conductor)
/// is drawn as hidden.
#[must_use]
pub fn pane_content<'a>(
    status: CommandBarStatus,
    response: Option<&'a TaskResponse>,
    error: Option<&'a str>,
    view: ResultView,
) -> PaneContent<'a> {
    match status {
        CommandBarStatus::Idle => PaneContent::Hidden,
        CommandBarStatus::Loading => PaneContent::Loading,
        CommandBarStatus::Error => PaneContent::Error(error.unwrap_or_default()),
        CommandBarStatus::Success => match response {
            Some(response) => PaneContent::Result { response, view },
            None => PaneContent::Hidden,
        },
    }
}

fn kpi_cards(kpis: &Kpis) -> Vec<KpiCard> {
    vec![
        KpiCard {
            label: "Revenue",
            value: format!("${}", grouped_number(kpis.revenue)),
        },
        KpiCard {
            label: "Gross Margin",
            value: format!("{}%", plain_number(kpis.gross_margin_pct)),
        },
        KpiCard {
            label: "Stock Turns",
            value: fixed(kpis.stock_turns, 1),
        },
        KpiCard {
            label: "Service Level",
            value: format!("{}%", plain_number(kpis.service_level_pct)),
        },
    ]
}

/// Summary projection
#[must_use]
pub fn summary(response: &TaskResponse) -> SummaryView {
    match response {
        TaskResponse::AnalyzeBusiness(analysis) => SummaryView::Kpis(kpi_cards(&analysis.kpis)),
        TaskResponse::AskAssistant(answer) => SummaryView::Answer(answer.answer.clone()),
        _ => SummaryView::Placeholder(SUMMARY_PLACEHOLDER),
    }
}

/// Table projection; `None` means [`TABLE_UNAVAILABLE`]
#[must_use]
pub fn table(response: &TaskResponse) -> Option<TableView> {
    match response {
        TaskResponse::ForecastDemand(f) => Some(TableView {
            headers: vec![
                "ILC",
                "Store",
                "Week",
                "Forecast Qty",
                "Low CI",
                "High CI",
                "Uplift",
            ],
            rows: f
                .forecast
                .iter()
                .map(|row| {
                    vec![
                        row.ilc.to_string(),
                        row.store.clone(),
                        row.week.clone(),
                        row.qty.to_string(),
                        row.lo.to_string(),
                        row.hi.to_string(),
                        format!("{}%", plain_number(row.uplift_pct.unwrap_or(0.0))),
                    ]
                })
                .collect(),
        }),
        TaskResponse::OptimizeStock(s) => Some(TableView {
            headers: vec![
                "ILC",
                "Store",
                "WOC",
                "OM",
                "OP",
                "ROP",
                "Safety Stock",
                "Note",
            ],
            rows: s
                .recommendations
                .iter()
                .map(|r| {
                    vec![
                        r.ilc.to_string(),
                        r.store.clone(),
                        plain_number(r.woc),
                        r.om.to_string(),
                        r.op.to_string(),
                        r.rop.to_string(),
                        r.safety_stock.to_string(),
                        r.note.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
        }),
        TaskResponse::PlanPromotions(p) => Some(TableView {
            headers: vec![
                "ILC",
                "Current Price",
                "Discount",
                "Suggested Price",
                "Expected Uplift",
                "Baseline Units",
            ],
            rows: p
                .promos
                .iter()
                .map(|promo| {
                    vec![
                        promo.ilc.to_string(),
                        format!("${}", fixed(promo.current_price, 2)),
                        format!("{}%", plain_number(promo.recommended_discount)),
                        format!("${}", fixed(promo.suggested_price, 2)),
                        format!("+{}%", plain_number(promo.uplift_pct)),
                        promo.baseline.to_string(),
                    ]
                })
                .collect(),
        }),
        _ => None,
    }
}

/// Chart projection; `None` means [`CHART_UNAVAILABLE`]
#[must_use]
pub fn chart(response: &TaskResponse) -> Option<Vec<ChartBar>> {
    match response {
        TaskResponse::ForecastDemand(f) => Some(
            f.forecast
                .iter()
                .map(|row| ChartBar {
                    label: format!("ILC {}", row.ilc),
                    value: u64::from(row.qty),
                })
                .collect(),
        ),
        _ => None,
    }
}
