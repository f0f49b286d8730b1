//! Conductor - The Command-Bar Core
//!
//! The Conductor owns everything a command bar needs and nothing a terminal
//! does:
//! - intent classification of submitted text
//! - dispatch to the task executor
//! - the status / result / error triple
//! - the recent-query list
//! - the selected result view and CSV export
//!
//! Surfaces talk to it through [`SurfaceEvent`]s and mirror the
//! [`ConductorMessage`]s it sends back.
//!
//! # Submission Lifecycle
//!
//! ```text
//! Idle ──submit──▶ Loading ──resolve──▶ Success
//!                     ▲     ──reject───▶ Error
//!                     └──────submit─────────┘
//! ```
//!
//! Each accepted submission runs on its own spawned task and reports back
//! through an internal channel, drained by [`Conductor::poll_responses`] or
//! awaited with [`Conductor::wait_for_response`]. Earlier requests are never
//! cancelled: completions apply in arrival order, so whichever resolves last
//! is what the pane shows.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::backend::{ExecutorError, TaskExecutor};
use crate::events::{SurfaceEvent, SurfaceType};
use crate::intent::IntentClassifier;
use crate::messages::{CommandBarStatus, ConductorMessage, NotifyLevel, RequestId};
use crate::recent::RecentQueryStore;
use crate::response::TaskResponse;
use crate::tasks::{TaskRequest, SUGGESTIONS};
use crate::views::{self, PaneContent, ResultView};

/// User-facing message for any failed request
pub const GENERIC_ERROR: &str = "An error occurred while processing your request.";

/// Outcome of one dispatched request
type Completion = (RequestId, Result<TaskResponse, ExecutorError>);

/// Conductor configuration
#[derive(Clone, Debug)]
pub struct ConductorConfig {
    /// Directory CSV exports are written to
    pub export_dir: PathBuf,
    /// Capacity of the completion channel
    pub completion_buffer: usize,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            completion_buffer: 32,
        }
    }
}

/// The Conductor - headless command-bar core
pub struct Conductor<E: TaskExecutor> {
    /// Configuration
    config: ConductorConfig,
    /// Task executor
    executor: Arc<E>,
    /// Text to task router
    classifier: IntentClassifier,
    /// Recent-query list and its file
    recent: RecentQueryStore,
    /// Current status
    status: CommandBarStatus,
    /// Last successful response
    result: Option<TaskResponse>,
    /// Last failure message
    error: Option<String>,
    /// Selected result view
    view: ResultView,
    /// Requests dispatched but not yet applied
    in_flight: usize,
    /// Completion channel, sender half cloned into each request task
    completions_tx: mpsc::Sender<Completion>,
    completions_rx: mpsc::Receiver<Completion>,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<ConductorMessage>,
    /// Connected surface
    surface_type: Option<SurfaceType>,
}

impl<E: TaskExecutor + 'static> Conductor<E> {
    /// Create a Conductor with the default keyword table and an in-memory
    /// recent list
    pub fn new(executor: E, config: ConductorConfig, tx: mpsc::Sender<ConductorMessage>) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel(config.completion_buffer.max(1));

        Self {
            config,
            executor: Arc::new(executor),
            classifier: IntentClassifier::new(),
            recent: RecentQueryStore::in_memory(),
            status: CommandBarStatus::Idle,
            result: None,
            error: None,
            view: ResultView::Summary,
            in_flight: 0,
            completions_tx,
            completions_rx,
            tx,
            surface_type: None,
        }
    }

    /// Use a custom classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use an opened recent-query store
    #[must_use]
    pub fn with_recent_store(mut self, recent: RecentQueryStore) -> Self {
        self.recent = recent;
        self
    }

    /// Current status
    pub fn status(&self) -> CommandBarStatus {
        self.status
    }

    /// Current result, present only after a success
    pub fn result(&self) -> Option<&TaskResponse> {
        self.result.as_ref()
    }

    /// Current error message, present only after a failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Selected result view
    pub fn view(&self) -> ResultView {
        self.view
    }

    /// Recent queries, most recent first
    pub fn recent_queries(&self) -> &[String] {
        self.recent.entries()
    }

    /// Requests dispatched but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Intent classifier in use
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// What the result pane should show right now
    pub fn pane(&self) -> PaneContent<'_> {
        views::pane_content(
            self.status,
            self.result.as_ref(),
            self.error.as_deref(),
            self.view,
        )
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::Connected { surface_type } => {
                tracing::info!(surface = surface_type.name(), "Surface connected");
                self.surface_type = Some(surface_type);
                self.send(ConductorMessage::Status {
                    status: self.status,
                })
                .await;
                self.send_recent().await;
            }

            SurfaceEvent::Submit { query } => {
                self.submit(&query).await;
            }

            SurfaceEvent::SuggestionSelected { index } => {
                self.select_suggestion(index).await;
            }

            SurfaceEvent::ViewSelected { view } => {
                self.select_view(view).await;
            }

            SurfaceEvent::ExportRequested => {
                self.export().await;
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Submit command-bar text
    ///
    /// Whitespace-only text is ignored and returns `None`. Otherwise the
    /// request is dispatched and its id returned; the outcome arrives through
    /// [`Self::poll_responses`].
    pub async fn submit(&mut self, query: &str) -> Option<RequestId> {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring blank submission");
            return None;
        }

        self.status = CommandBarStatus::Loading;
        self.result = None;
        self.error = None;
        self.send(ConductorMessage::Status {
            status: self.status,
        })
        .await;

        if let Err(e) = self.recent.record(query).await {
            tracing::warn!(error = %e, "Failed to persist recent queries");
        }
        self.send_recent().await;

        let task = self.classifier.classify(query);
        let request_id = RequestId::new();
        tracing::info!(request_id = %request_id, task = %task, "Query accepted");

        self.send(ConductorMessage::QueryAccepted {
            request_id: request_id.clone(),
            query: query.to_string(),
            task,
        })
        .await;

        let request = TaskRequest::from_query(task, query);
        let executor = Arc::clone(&self.executor);
        let done = self.completions_tx.clone();
        let id = request_id.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            // Inner task so a panicking executor still yields a completion
            let outcome = match tokio::spawn(async move { executor.execute(&request).await }).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(request_id = %id, error = %e, "Executor task aborted");
                    Err(ExecutorError::Unavailable(format!("executor task aborted: {e}")))
                }
            };
            if done.send((id, outcome)).await.is_err() {
                tracing::debug!("Conductor dropped before request completed");
            }
        });

        Some(request_id)
    }

    /// Submit the suggestion at `index`
    pub async fn select_suggestion(&mut self, index: usize) -> Option<RequestId> {
        let Some(suggestion) = SUGGESTIONS.get(index) else {
            tracing::debug!(index, "No suggestion at index");
            return None;
        };
        self.submit(suggestion.text).await
    }

    /// Apply every completion that has already arrived; returns how many
    pub async fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion).await;
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn wait_for_response(&mut self) -> Option<RequestId> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        let request_id = completion.0.clone();
        self.apply_completion(completion).await;
        Some(request_id)
    }

    async fn apply_completion(&mut self, (request_id, outcome): Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(response) => {
                tracing::info!(request_id = %request_id, task = %response.kind(), "Request resolved");
                self.result = Some(response.clone());
                self.error = None;
                self.status = CommandBarStatus::Success;

                self.send(ConductorMessage::Result {
                    request_id,
                    response,
                })
                .await;
                self.send(ConductorMessage::Status {
                    status: self.status,
                })
                .await;

                if self.view != ResultView::Summary {
                    self.view = ResultView::Summary;
                    self.send(ConductorMessage::ViewChanged { view: self.view })
                        .await;
                }
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Request failed");
                self.result = None;
                self.error = Some(GENERIC_ERROR.to_string());
                self.status = CommandBarStatus::Error;

                self.send(ConductorMessage::Error {
                    request_id,
                    message: GENERIC_ERROR.to_string(),
                })
                .await;
                self.send(ConductorMessage::Status {
                    status: self.status,
                })
                .await;
            }
        }
    }

    /// Select a result view
    pub async fn select_view(&mut self, view: ResultView) {
        if self.view == view {
            return;
        }
        self.view = view;
        self.send(ConductorMessage::ViewChanged { view }).await;
    }

    /// Export the current result as CSV into the export directory
    ///
    /// Returns the written path. Failures are reported to the surface as
    /// notifications, never as errors.
    pub async fn export(&mut self) -> Option<PathBuf> {
        let Some(response) = &self.result else {
            self.notify(NotifyLevel::Warning, "Nothing to export yet")
                .await;
            return None;
        };

        let export = match views::export_csv(response) {
            Ok(Some(export)) => export,
            Ok(None) => {
                self.notify(NotifyLevel::Info, "This result has no rows to export")
                    .await;
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render export");
                self.notify(NotifyLevel::Error, "Export failed").await;
                return None;
            }
        };

        match views::write_export(&self.config.export_dir, &export).await {
            Ok(path) => {
                self.send(ConductorMessage::Exported {
                    path: path.clone(),
                    rows: export.rows,
                })
                .await;
                self.notify(
                    NotifyLevel::Success,
                    &format!("Exported {} rows to {}", export.rows, path.display()),
                )
                .await;
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write export");
                self.notify(NotifyLevel::Error, &format!("Export failed: {e}"))
                    .await;
                None
            }
        }
    }

    /// Shut down the Conductor
    ///
    /// In-flight requests are left to finish on their own.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            in_flight = self.in_flight,
            surface = self.surface_type.as_ref().map_or("none", SurfaceType::name),
            "Conductor shutting down"
        );

        self.send(ConductorMessage::Quit {
            message: Some("Goodbye!".to_string()),
        })
        .await;

        Ok(())
    }

    async fn send_recent(&self) {
        self.send(ConductorMessage::RecentQueries {
            entries: self.recent.entries().to_vec(),
        })
        .await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(ConductorMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: ConductorMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
