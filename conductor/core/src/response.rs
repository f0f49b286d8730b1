//! Task Responses
//!
//! One payload shape per [`TaskKind`], joined in the [`TaskResponse`] sum type.
//! The `task` field is the serde tag, so a response can never claim one kind
//! while carrying another kind's fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tasks::TaskKind;

/// Item lookup code identifying a product
pub type Ilc = u64;

/// Headline business figures
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Total revenue in dollars
    pub revenue: f64,
    /// Gross margin, percent
    pub gross_margin_pct: f64,
    /// Inventory turns per year
    pub stock_turns: f64,
    /// Service level, percent
    pub service_level_pct: f64,
}

/// Revenue for one product category
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    /// Category name
    pub name: String,
    /// Revenue in dollars
    pub revenue: f64,
}

/// Seasonality index for one month
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    /// Month abbreviation
    pub month: String,
    /// Demand index relative to the yearly mean
    pub index: f64,
}

/// Catalogue data gaps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// SKUs with no retail price
    pub missing_prices: u32,
    /// SKUs with no cost
    pub sku_without_cost: u32,
}

/// `analyzeBusiness` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessAnalysis {
    /// Headline figures
    pub kpis: Kpis,
    /// Best-selling categories
    pub top_categories: Vec<CategoryRevenue>,
    /// Monthly seasonality indices
    pub seasonality: Vec<SeasonalityPoint>,
    /// Data gaps found while analyzing
    pub data_quality: DataQuality,
}

/// One forecast row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Product
    pub ilc: Ilc,
    /// Store code
    pub store: String,
    /// ISO week start date
    pub week: String,
    /// Forecast units
    pub qty: u32,
    /// Lower confidence bound
    pub lo: u32,
    /// Upper confidence bound
    pub hi: u32,
    /// Promotional uplift, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplift_pct: Option<f64>,
}

/// `forecastDemand` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    /// Forecast rows
    pub forecast: Vec<ForecastRow>,
}

/// One replenishment recommendation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockRecommendation {
    /// Product
    pub ilc: Ilc,
    /// Store code
    pub store: String,
    /// Weeks of cover
    pub woc: f64,
    /// Order point
    pub op: u32,
    /// Order multiple
    pub om: u32,
    /// Reorder point
    pub rop: u32,
    /// Safety stock units
    pub safety_stock: u32,
    /// Optional analyst note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `optimizeStock` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockPlan {
    /// Recommendations per item and store
    pub recommendations: Vec<StockRecommendation>,
}

/// One purchase order line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product
    pub ilc: Ilc,
    /// Units to order
    pub qty: u32,
    /// Line cost in dollars
    pub cost: f64,
    /// Expected arrival date
    pub eta: String,
}

/// A purchase order for one supplier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Supplier name
    pub supplier: String,
    /// Order lines
    pub lines: Vec<OrderLine>,
}

/// `generatePurchasePlan` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchasePlan {
    /// One order per supplier
    pub orders: Vec<PurchaseOrder>,
}

/// One promotion candidate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Product
    pub ilc: Ilc,
    /// Baseline weekly units
    pub baseline: u32,
    /// Expected uplift, percent
    pub uplift_pct: f64,
    /// Recommended discount, percent
    pub recommended_discount: f64,
    /// Products expected to lose sales
    pub cannibalization: Vec<Ilc>,
    /// Shelf price today
    pub current_price: f64,
    /// Promotional price
    pub suggested_price: f64,
}

/// `planPromotions` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromotionPlan {
    /// Promotion candidates
    pub promos: Vec<Promotion>,
}

/// One suggested price change
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceMove {
    /// Product
    pub ilc: Ilc,
    /// Shelf price today
    pub current_price: f64,
    /// Suggested shelf price
    pub suggested_price: f64,
    /// Expected volume change, percent
    pub expected_volume_delta_pct: f64,
    /// Expected profit change in dollars
    pub profit_delta: f64,
}

/// `optimizePrices` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePlan {
    /// Suggested moves
    pub price_moves: Vec<PriceMove>,
}

/// Facings for one product
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelfPlacement {
    /// Product
    pub ilc: Ilc,
    /// Number of facings
    pub facings: u32,
    /// Placement notes
    pub notes: String,
}

/// `optimizeShelves` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planogram {
    /// Placements
    pub planogram: Vec<ShelfPlacement>,
}

/// `askAssistant` payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    /// Free-text answer
    pub answer: String,
}

/// A response from the task executor, tagged by task kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "camelCase")]
pub enum TaskResponse {
    /// KPI overview
    AnalyzeBusiness(BusinessAnalysis),
    /// Demand forecast
    ForecastDemand(DemandForecast),
    /// Replenishment parameters
    OptimizeStock(StockPlan),
    /// Purchase orders
    GeneratePurchasePlan(PurchasePlan),
    /// Promotion candidates
    PlanPromotions(PromotionPlan),
    /// Price moves
    OptimizePrices(PricePlan),
    /// Planogram
    OptimizeShelves(Planogram),
    /// Free-text answer
    AskAssistant(AssistantAnswer),
}

/// A response that failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseError {
    /// Payload did not match any response shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Payload belongs to a different task than requested
    #[error("expected a {expected} response, got {actual}")]
    TaskMismatch {
        /// Requested task
        expected: TaskKind,
        /// Task named by the payload
        actual: TaskKind,
    },

    /// A numeric field was NaN or infinite
    #[error("field {field} is not a finite number")]
    NonFinite {
        /// Field name
        field: &'static str,
    },
}

impl TaskResponse {
    /// The task kind this response answers
    #[must_use]
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::AnalyzeBusiness(_) => TaskKind::AnalyzeBusiness,
            Self::ForecastDemand(_) => TaskKind::ForecastDemand,
            Self::OptimizeStock(_) => TaskKind::OptimizeStock,
            Self::GeneratePurchasePlan(_) => TaskKind::GeneratePurchasePlan,
            Self::PlanPromotions(_) => TaskKind::PlanPromotions,
            Self::OptimizePrices(_) => TaskKind::OptimizePrices,
            Self::OptimizeShelves(_) => TaskKind::OptimizeShelves,
            Self::AskAssistant(_) => TaskKind::AskAssistant,
        }
    }

    /// Parse a candidate JSON payload as the response to `expected`
    ///
    /// # Errors
    ///
    /// Fails when the payload matches no response shape, names another task,
    /// or carries a non-finite number.
    pub fn from_candidate(
        expected: TaskKind,
        candidate: serde_json::Value,
    ) -> Result<Self, ResponseError> {
        let response: Self = serde_json::from_value(candidate)
            .map_err(|e| ResponseError::Malformed(e.to_string()))?;

        if response.kind() != expected {
            return Err(ResponseError::TaskMismatch {
                expected,
                actual: response.kind(),
            });
        }

        response.validate()?;
        Ok(response)
    }

    /// Check that every numeric field is finite
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ResponseError> {
        match self {
            Self::AnalyzeBusiness(a) => {
                finite("revenue", a.kpis.revenue)?;
                finite("gross_margin_pct", a.kpis.gross_margin_pct)?;
                finite("stock_turns", a.kpis.stock_turns)?;
                finite("service_level_pct", a.kpis.service_level_pct)?;
                for c in &a.top_categories {
                    finite("top_categories.revenue", c.revenue)?;
                }
                for s in &a.seasonality {
                    finite("seasonality.index", s.index)?;
                }
            }
            Self::ForecastDemand(f) => {
                for row in &f.forecast {
                    if let Some(uplift) = row.uplift_pct {
                        finite("uplift_pct", uplift)?;
                    }
                }
            }
            Self::OptimizeStock(s) => {
                for r in &s.recommendations {
                    finite("woc", r.woc)?;
                }
            }
            Self::GeneratePurchasePlan(p) => {
                for line in p.orders.iter().flat_map(|o| &o.lines) {
                    finite("cost", line.cost)?;
                }
            }
            Self::PlanPromotions(p) => {
                for promo in &p.promos {
                    finite("uplift_pct", promo.uplift_pct)?;
                    finite("recommended_discount", promo.recommended_discount)?;
                    finite("current_price", promo.current_price)?;
                    finite("suggested_price", promo.suggested_price)?;
                }
            }
            Self::OptimizePrices(p) => {
                for m in &p.price_moves {
                    finite("current_price", m.current_price)?;
                    finite("suggested_price", m.suggested_price)?;
                    finite("expected_volume_delta_pct", m.expected_volume_delta_pct)?;
                    finite("profit_delta", m.profit_delta)?;
                }
            }
            Self::OptimizeShelves(_) | Self::AskAssistant(_) => {}
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ResponseError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ResponseError::NonFinite { field })
    }
}
