//! Integration tests for the command-bar core
//!
//! These tests drive the Conductor the way a surface does and check that the
//! classifier, executor, recent-query store, views and config work together:
//! - submission lifecycle against the mock executor
//! - overlapping submissions (last to resolve wins)
//! - recent queries persisted across restarts
//! - CSV export written to the configured directory
//! - TOML configuration feeding the classifier and conductor

use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};
use tokio::sync::mpsc;

use galaxrx_core::backend::{ExecutorError, MockExecutor, TaskExecutor};
use galaxrx_core::config::load_config_with_env;
use galaxrx_core::messages::{CommandBarStatus, ConductorMessage};
use galaxrx_core::recent::{RecentQueryStore, RECENT_QUERIES_FILE};
use galaxrx_core::response::{AssistantAnswer, TaskResponse};
use galaxrx_core::tasks::{TaskKind, TaskRequest};
use galaxrx_core::views::{self, PaneContent, ResultView, SummaryView};
use galaxrx_core::{Conductor, ConductorConfig, SurfaceEvent, SurfaceType};

// =============================================================================
// Helpers
// =============================================================================

/// Executor whose latency is taken from the query: "slow" takes 500 ms,
/// anything else 10 ms. Answers echo the query.
struct ScriptedExecutor;

#[async_trait::async_trait]
impl TaskExecutor for ScriptedExecutor {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn execute(&self, request: &TaskRequest) -> Result<TaskResponse, ExecutorError> {
        let query = request.query().unwrap_or_default().to_string();
        let delay = if query.contains("slow") { 500 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(TaskResponse::AskAssistant(AssistantAnswer { answer: query }))
    }
}

fn instant_mock() -> MockExecutor {
    MockExecutor::new().with_delay(Duration::ZERO)
}

fn drain(rx: &mut mpsc::Receiver<ConductorMessage>) -> Vec<ConductorMessage> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}

// =============================================================================
// Submission lifecycle
// =============================================================================

#[tokio::test]
async fn test_surface_session_end_to_end() {
    let (tx, mut rx) = mpsc::channel(100);
    let mut conductor = Conductor::new(instant_mock(), ConductorConfig::default(), tx);

    conductor
        .handle_event(SurfaceEvent::Connected {
            surface_type: SurfaceType::Headless,
        })
        .await
        .unwrap();
    assert!(matches!(
        drain(&mut rx).as_slice(),
        [
            ConductorMessage::Status {
                status: CommandBarStatus::Idle
            },
            ConductorMessage::RecentQueries { .. }
        ]
    ));

    conductor
        .handle_event(SurfaceEvent::Submit {
            query: "How is my business health?".to_string(),
        })
        .await
        .unwrap();
    conductor.wait_for_response().await.unwrap();

    let PaneContent::Result { response, view } = conductor.pane() else {
        panic!("expected a result pane");
    };
    assert_eq!(view, ResultView::Summary);
    let SummaryView::Kpis(cards) = views::summary(response) else {
        panic!("expected KPI cards");
    };
    assert_eq!(cards[0].value, "$1,250,340");

    conductor
        .handle_event(SurfaceEvent::ViewSelected {
            view: ResultView::Table,
        })
        .await
        .unwrap();
    assert_eq!(views::table(response_of(&conductor)), None);
}

fn response_of<E: TaskExecutor + 'static>(conductor: &Conductor<E>) -> &TaskResponse {
    conductor.result().expect("a result")
}

#[tokio::test]
async fn test_zero_stock_question_end_to_end() {
    let (tx, _rx) = mpsc::channel(100);
    let mut conductor = Conductor::new(instant_mock(), ConductorConfig::default(), tx);

    // "stock" routes to optimizeStock before the assistant sees the question
    conductor.submit("Which SKUs have zero stock?").await.unwrap();
    conductor.wait_for_response().await.unwrap();
    assert_eq!(
        response_of(&conductor).kind(),
        TaskKind::OptimizeStock
    );

    // no keyword: falls back to the assistant
    conductor
        .submit("Anything nearing expiry this month?")
        .await
        .unwrap();
    conductor.wait_for_response().await.unwrap();
    let TaskResponse::AskAssistant(AssistantAnswer { answer }) = response_of(&conductor) else {
        panic!("expected an assistant answer");
    };
    assert!(answer.starts_with("Three products are nearing their expiry date"));
}

#[tokio::test(start_paused = true)]
async fn test_last_resolved_submission_wins() {
    let (tx, _rx) = mpsc::channel(100);
    let mut conductor = Conductor::new(ScriptedExecutor, ConductorConfig::default(), tx);

    conductor.submit("slow question").await.unwrap();
    conductor.submit("quick question").await.unwrap();
    assert_eq!(conductor.in_flight(), 2);

    conductor.wait_for_response().await.unwrap();
    assert_eq!(conductor.status(), CommandBarStatus::Success);
    assert_eq!(
        conductor.result(),
        Some(&TaskResponse::AskAssistant(AssistantAnswer {
            answer: "quick question".to_string()
        }))
    );

    conductor.wait_for_response().await.unwrap();
    assert_eq!(
        conductor.result(),
        Some(&TaskResponse::AskAssistant(AssistantAnswer {
            answer: "slow question".to_string()
        }))
    );
    assert_eq!(conductor.in_flight(), 0);
    assert_eq!(conductor.wait_for_response().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_poll_responses_applies_only_finished_requests() {
    let (tx, _rx) = mpsc::channel(100);
    let executor = MockExecutor::new();
    let mut conductor = Conductor::new(executor, ConductorConfig::default(), tx);

    conductor.submit("forecast").await.unwrap();
    assert_eq!(conductor.poll_responses().await, 0);
    assert_eq!(conductor.status(), CommandBarStatus::Loading);

    tokio::time::sleep(Duration::from_millis(1300)).await;
    assert_eq!(conductor.poll_responses().await, 1);
    assert_eq!(conductor.status(), CommandBarStatus::Success);
}

// =============================================================================
// Recent queries
// =============================================================================

#[tokio::test]
async fn test_recent_queries_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(RECENT_QUERIES_FILE);

    {
        let (tx, _rx) = mpsc::channel(100);
        let store = RecentQueryStore::open(&path).await.unwrap();
        let mut conductor = Conductor::new(instant_mock(), ConductorConfig::default(), tx)
            .with_recent_store(store);

        for query in ["a", "b", "c", "d", "e", "f", "c"] {
            conductor.submit(query).await.unwrap();
        }
        assert_eq!(conductor.recent_queries(), ["c", "f", "e", "d", "b"]);
    }

    let (tx, _rx) = mpsc::channel(100);
    let store = RecentQueryStore::open_or_empty(Some(path)).await;
    let conductor =
        Conductor::new(instant_mock(), ConductorConfig::default(), tx).with_recent_store(store);
    assert_eq!(conductor.recent_queries(), ["c", "f", "e", "d", "b"]);
}

#[tokio::test]
async fn test_whitespace_submission_leaves_everything_unchanged() {
    let (tx, _rx) = mpsc::channel(100);
    let mut conductor = Conductor::new(instant_mock(), ConductorConfig::default(), tx);

    conductor.submit("shelf").await.unwrap();
    conductor.wait_for_response().await.unwrap();
    let before = conductor.result().cloned();

    assert_eq!(conductor.submit("  \n ").await, None);
    assert_eq!(conductor.status(), CommandBarStatus::Success);
    assert_eq!(conductor.result().cloned(), before);
    assert_eq!(conductor.recent_queries(), ["shelf"]);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_forecast_export_file() {
    let dir = TempDir::new().unwrap();
    let (tx, _rx) = mpsc::channel(100);
    let config = ConductorConfig {
        export_dir: dir.path().to_path_buf(),
        ..ConductorConfig::default()
    };
    let mut conductor = Conductor::new(instant_mock(), config, tx);

    conductor
        .handle_event(SurfaceEvent::SuggestionSelected { index: 1 })
        .await
        .unwrap();
    conductor.wait_for_response().await.unwrap();
    conductor
        .handle_event(SurfaceEvent::ExportRequested)
        .await
        .unwrap();

    let written = tokio::fs::read_to_string(dir.path().join("forecastDemand_export.csv"))
        .await
        .unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines[0], "ilc,store,week,qty,lo,hi,uplift_pct");
    assert_eq!(lines[2], "45887,302,2025-10-06,18,12,25,");
    assert_eq!(lines.len(), 4);
}

#[tokio::test]
async fn test_purchase_plan_has_nothing_to_export() {
    let dir = TempDir::new().unwrap();
    let (tx, _rx) = mpsc::channel(100);
    let config = ConductorConfig {
        export_dir: dir.path().to_path_buf(),
        ..ConductorConfig::default()
    };
    let mut conductor = Conductor::new(instant_mock(), config, tx);

    conductor.submit("Draft an AI-optimized purchase plan").await.unwrap();
    conductor.wait_for_response().await.unwrap();
    assert_eq!(
        response_of(&conductor).kind(),
        TaskKind::GeneratePurchasePlan
    );
    assert_eq!(conductor.export().await, None);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_config_file_drives_conductor() {
    let dir = TempDir::new().unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[executor]
delay_ms = 0

[storage]
export_dir = "{}"

[intent]
extra_keywords = [["markdown", "planPromotions"]]
"#,
        dir.path().display()
    )
    .unwrap();

    let config = load_config_with_env(Some(file.path().to_path_buf()), |_| None).unwrap();
    let (tx, _rx) = mpsc::channel(100);
    let executor = MockExecutor::new().with_delay(config.executor_delay);
    let mut conductor = Conductor::new(executor, config.conductor_config(), tx)
        .with_classifier(config.classifier());

    conductor.submit("plan a markdown").await.unwrap();
    conductor.wait_for_response().await.unwrap();
    assert_eq!(response_of(&conductor).kind(), TaskKind::PlanPromotions);

    let path = conductor.export().await.unwrap();
    assert_eq!(path, dir.path().join("planPromotions_export.csv"));
}
