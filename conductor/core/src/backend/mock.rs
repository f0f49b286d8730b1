//! Mock Executor
//!
//! Serves a static table of canned responses, one per task kind, after a
//! fixed simulated latency. Assistant questions get one of three canned
//! answers depending on what the query mentions.
//!
//! Every candidate is parsed and checked against the requested kind before it
//! is returned. With the built-in table this can only fail through a defect,
//! but the check keeps a broken table from ever reaching a surface.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{ExecutorError, TaskExecutor};
use crate::response::TaskResponse;
use crate::tasks::{TaskKind, TaskRequest};

/// Simulated latency applied to every request
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1200);

/// Built-in canned responses keyed by task wire name
const CANNED_RESPONSES: &str = include_str!("../../data/mock_responses.json");

const ZERO_STOCK_ANSWER: &str = "Currently, 2 SKUs have zero stock: Atorvastatin 20mg (ILC: 45887) and Salbutamol Inhaler (ILC: 99120). A purchase order recommendation for Atorvastatin is already in the latest plan.";

const NEARING_EXPIRY_ANSWER: &str = "Three products are nearing their expiry date within the next 30 days: Amoxicillin 500mg (12 units), Lisinopril 10mg (8 units), and Vitamin C 1000mg (25 units). I recommend creating a promotion for the Vitamin C to accelerate sell-through.";

/// Which canned assistant answer a query selects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistantTopic {
    /// Query mentions "zero stock"
    ZeroStock,
    /// Query mentions "nearing expiry"
    NearingExpiry,
    /// Anything else: the table's default answer
    General,
}

impl AssistantTopic {
    /// Pick the topic for a query; "zero stock" is checked first
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let lower = query.to_lowercase();
        if lower.contains("zero stock") {
            Self::ZeroStock
        } else if lower.contains("nearing expiry") {
            Self::NearingExpiry
        } else {
            Self::General
        }
    }

    fn canned_answer(self) -> Option<&'static str> {
        match self {
            Self::ZeroStock => Some(ZERO_STOCK_ANSWER),
            Self::NearingExpiry => Some(NEARING_EXPIRY_ANSWER),
            Self::General => None,
        }
    }
}

/// Executor backed by a static response table
#[derive(Clone, Debug)]
pub struct MockExecutor {
    /// Latency before each response
    delay: Duration,
    /// JSON object keyed by task wire name
    table: Cow<'static, str>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutor {
    /// Mock over the built-in table with the default latency
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_MOCK_DELAY,
            table: Cow::Borrowed(CANNED_RESPONSES),
        }
    }

    /// Set the simulated latency
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the response table (a JSON object keyed by task wire name)
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Cow::Owned(table.into());
        self
    }

    /// Configured latency
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Choose the raw candidate for a request, before validation
    fn candidate(&self, request: &TaskRequest) -> Result<Value, ExecutorError> {
        if request.task == TaskKind::AskAssistant {
            let query = request.query().ok_or(ExecutorError::MissingQuery {
                task: request.task,
            })?;
            if let Some(answer) = AssistantTopic::from_query(query).canned_answer() {
                return Ok(serde_json::json!({
                    "task": TaskKind::AskAssistant.as_str(),
                    "answer": answer,
                }));
            }
        }

        let mut table: serde_json::Map<String, Value> =
            serde_json::from_str(&self.table).map_err(|e| ExecutorError::Table(e.to_string()))?;
        table
            .remove(request.task.as_str())
            .ok_or(ExecutorError::UnknownTask(request.task))
    }
}

#[async_trait]
impl TaskExecutor for MockExecutor {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn execute(&self, request: &TaskRequest) -> Result<TaskResponse, ExecutorError> {
        tracing::debug!(task = %request.task, delay_ms = self.delay.as_millis() as u64, "Mock task requested");

        tokio::time::sleep(self.delay).await;

        let candidate = self.candidate(request)?;
        TaskResponse::from_candidate(request.task, candidate).map_err(|e| {
            tracing::error!(task = %request.task, error = %e, "Mock response failed validation");
            ExecutorError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{AssistantAnswer, ResponseError};
    use pretty_assertions::assert_eq;

    fn instant() -> MockExecutor {
        MockExecutor::new().with_delay(Duration::ZERO)
    }

    fn answer_of(response: TaskResponse) -> String {
        match response {
            TaskResponse::AskAssistant(AssistantAnswer { answer }) => answer,
            other => panic!("expected an assistant answer, got {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_every_kind_resolves_with_matching_tag() {
        let executor = instant();
        for kind in TaskKind::ALL {
            let request = TaskRequest::from_query(kind, "anything");
            let response = executor.execute(&request).await.unwrap();
            assert_eq!(response.kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_zero_stock_variant() {
        let request =
            TaskRequest::from_query(TaskKind::AskAssistant, "Which SKUs have ZERO STOCK today?");
        let answer = answer_of(instant().execute(&request).await.unwrap());
        assert!(answer.starts_with("Currently, 2 SKUs have zero stock"));
    }

    #[tokio::test]
    async fn test_zero_stock_checked_before_expiry() {
        let request = TaskRequest::from_query(
            TaskKind::AskAssistant,
            "items nearing expiry or at zero stock",
        );
        assert_eq!(
            AssistantTopic::from_query(request.query().unwrap()),
            AssistantTopic::ZeroStock
        );
        let answer = answer_of(instant().execute(&request).await.unwrap());
        assert_eq!(answer, ZERO_STOCK_ANSWER);
    }

    #[tokio::test]
    async fn test_expiry_and_default_variants() {
        let executor = instant();

        let expiry = TaskRequest::from_query(TaskKind::AskAssistant, "what is nearing expiry?");
        assert_eq!(
            AssistantTopic::from_query("what is nearing expiry?"),
            AssistantTopic::NearingExpiry
        );
        assert_eq!(
            answer_of(executor.execute(&expiry).await.unwrap()),
            NEARING_EXPIRY_ANSWER
        );

        let general = TaskRequest::from_query(TaskKind::AskAssistant, "find my dead stock");
        assert_eq!(
            AssistantTopic::from_query("find my dead stock"),
            AssistantTopic::General
        );
        let answer = answer_of(executor.execute(&general).await.unwrap());
        assert!(answer.contains("Vitamin C 1000mg"));
    }

    #[tokio::test]
    async fn test_assistant_without_query_rejects() {
        let request = TaskRequest::new(TaskKind::AskAssistant);
        let err = instant().execute(&request).await.unwrap_err();
        assert_eq!(
            err,
            ExecutorError::MissingQuery {
                task: TaskKind::AskAssistant
            }
        );
    }

    #[tokio::test]
    async fn test_other_tasks_ignore_missing_query() {
        let request = TaskRequest::new(TaskKind::OptimizeShelves);
        let response = instant().execute(&request).await.unwrap();
        assert_eq!(response.kind(), TaskKind::OptimizeShelves);
    }

    #[tokio::test]
    async fn test_mismatched_table_entry_is_rejected() {
        let executor = instant().with_table(
            r#"{ "forecastDemand": { "task": "optimizeShelves", "planogram": [] } }"#,
        );
        let request = TaskRequest::from_query(TaskKind::ForecastDemand, "forecast");
        let err = executor.execute(&request).await.unwrap_err();
        assert_eq!(
            err,
            ExecutorError::InvalidResponse(ResponseError::TaskMismatch {
                expected: TaskKind::ForecastDemand,
                actual: TaskKind::OptimizeShelves,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_table_entry() {
        let executor = instant().with_table("{}");
        let request = TaskRequest::from_query(TaskKind::OptimizePrices, "prices");
        assert_eq!(
            executor.execute(&request).await.unwrap_err(),
            ExecutorError::UnknownTask(TaskKind::OptimizePrices)
        );
    }

    #[tokio::test]
    async fn test_unreadable_table() {
        let executor = instant().with_table("not json");
        let request = TaskRequest::from_query(TaskKind::OptimizePrices, "prices");
        assert!(matches!(
            executor.execute(&request).await,
            Err(ExecutorError::Table(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let executor = MockExecutor::new();
        assert_eq!(executor.delay(), DEFAULT_MOCK_DELAY);

        let request = TaskRequest::from_query(TaskKind::OptimizeShelves, "shelf");
        let started = tokio::time::Instant::now();
        executor.execute(&request).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_MOCK_DELAY);
    }
}
