//! Task Kinds and Requests
//!
//! The closed set of task kinds the executor understands, the request shape
//! sent to it, and the canned suggestion shortcuts offered by the command bar.
//!
//! # Wire Names
//!
//! Task kinds serialize to camelCase (`analyzeBusiness`, `forecastDemand`, ...).
//! The same names tag [`crate::response::TaskResponse`] payloads and name
//! exported CSV files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One of the fixed categories of request the executor handles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    /// KPI overview of the whole business
    AnalyzeBusiness,
    /// Per-item weekly demand forecast
    ForecastDemand,
    /// Reorder points and order multiples
    OptimizeStock,
    /// Supplier purchase orders
    GeneratePurchasePlan,
    /// Promotion candidates with suggested discounts
    PlanPromotions,
    /// Suggested price moves
    OptimizePrices,
    /// Planogram facings
    OptimizeShelves,
    /// Free-text answer (the classifier fallback)
    AskAssistant,
}

impl TaskKind {
    /// Every task kind, in declaration order
    pub const ALL: [TaskKind; 8] = [
        Self::AnalyzeBusiness,
        Self::ForecastDemand,
        Self::OptimizeStock,
        Self::GeneratePurchasePlan,
        Self::PlanPromotions,
        Self::OptimizePrices,
        Self::OptimizeShelves,
        Self::AskAssistant,
    ];

    /// Wire name used in JSON and export file names
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnalyzeBusiness => "analyzeBusiness",
            Self::ForecastDemand => "forecastDemand",
            Self::OptimizeStock => "optimizeStock",
            Self::GeneratePurchasePlan => "generatePurchasePlan",
            Self::PlanPromotions => "planPromotions",
            Self::OptimizePrices => "optimizePrices",
            Self::OptimizeShelves => "optimizeShelves",
            Self::AskAssistant => "askAssistant",
        }
    }

    /// Parse a wire name. Matching is exact.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AnalyzeBusiness => "Business Health",
            Self::ForecastDemand => "Demand Forecast",
            Self::OptimizeStock => "Stock Optimization",
            Self::GeneratePurchasePlan => "Purchase Plan",
            Self::PlanPromotions => "Promotion Plan",
            Self::OptimizePrices => "Price Optimization",
            Self::OptimizeShelves => "Shelf Layout",
            Self::AskAssistant => "Assistant",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown task wire name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task kind: {0:?}")]
pub struct UnknownTaskKind(pub String);

impl std::str::FromStr for TaskKind {
    type Err = UnknownTaskKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownTaskKind(s.to_string()))
    }
}

/// A request to the task executor
///
/// Built once per accepted submission and dropped when the response arrives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Which task to run
    pub task: TaskKind,
    /// Free-form inputs; `query` holds the submitted text
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

impl TaskRequest {
    /// Create a request with an empty input bag
    #[must_use]
    pub fn new(task: TaskKind) -> Self {
        Self {
            task,
            inputs: Map::new(),
        }
    }

    /// Create a request carrying the submitted query text
    #[must_use]
    pub fn from_query(task: TaskKind, query: impl Into<String>) -> Self {
        Self::new(task).with_input("query", Value::String(query.into()))
    }

    /// Add an input value
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: Value) -> Self {
        self.inputs.insert(key.into(), value);
        self
    }

    /// The query text, if present and a string
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.inputs.get("query").and_then(Value::as_str)
    }
}

/// A canned shortcut prompt shown under the command bar
///
/// Selecting a suggestion submits its text through the classifier exactly
/// like typed input; `task_hint` is display metadata only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    /// Prompt text
    pub text: &'static str,
    /// Task the prompt is meant to reach
    pub task_hint: TaskKind,
}

/// The command bar's suggestion shortcuts, in display order
pub const SUGGESTIONS: [Suggestion; 6] = [
    Suggestion {
        text: "Draft an AI-optimized purchase plan",
        task_hint: TaskKind::GeneratePurchasePlan,
    },
    Suggestion {
        text: "Forecast demand to prevent stockouts",
        task_hint: TaskKind::ForecastDemand,
    },
    Suggestion {
        text: "Find my dead stock and its value",
        task_hint: TaskKind::AskAssistant,
    },
    Suggestion {
        text: "Analyze my business health",
        task_hint: TaskKind::AnalyzeBusiness,
    },
    Suggestion {
        text: "Analyze my top suppliers' performance",
        task_hint: TaskKind::AskAssistant,
    },
    Suggestion {
        text: "Suggest a better shelf layout",
        task_hint: TaskKind::OptimizeShelves,
    },
];
