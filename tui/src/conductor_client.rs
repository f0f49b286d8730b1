//! Conductor Client
//!
//! Thin wrapper around the Conductor for TUI integration.
//! This client embeds the Conductor directly (no network) and provides
//! a convenient interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All command-bar state lives in the Conductor. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Conductor
//! 3. Receive ConductorMessages
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use galaxrx_core::{
    CommandBarStatus, Conductor, ConductorMessage, GalaxrxConfig, MockExecutor,
    RecentQueryStore, ResultView, SurfaceEvent, SurfaceType, TaskExecutor,
};

/// Client for communicating with the embedded Conductor
pub struct ConductorClient<E: TaskExecutor + 'static = MockExecutor> {
    /// The embedded Conductor instance
    conductor: Conductor<E>,
    /// Receiver for messages from Conductor
    rx: mpsc::Receiver<ConductorMessage>,
}

impl ConductorClient<MockExecutor> {
    /// Create a client backed by the mock executor
    ///
    /// Opens the recent-query file named by `config`; an unreadable file
    /// starts an empty list.
    pub async fn from_config(config: &GalaxrxConfig) -> Self {
        let executor = MockExecutor::new().with_delay(config.executor_delay);
        let recent = RecentQueryStore::open_or_empty(config.recent_path.clone()).await;
        Self::with_executor(executor, config).with_recent_store(recent)
    }
}

impl<E: TaskExecutor + 'static> ConductorClient<E> {
    /// Create a client around any executor, with an in-memory recent list
    pub fn with_executor(executor: E, config: &GalaxrxConfig) -> Self {
        // Create channel for Conductor -> TUI messages
        let (tx, rx) = mpsc::channel(100);

        let conductor = Conductor::new(executor, config.conductor_config(), tx)
            .with_classifier(config.classifier());

        Self { conductor, rx }
    }

    /// Replace the recent-query store
    pub fn with_recent_store(mut self, store: RecentQueryStore) -> Self {
        self.conductor = self.conductor.with_recent_store(store);
        self
    }

    /// Connect this surface to the Conductor
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Connected {
            surface_type: SurfaceType::Tui,
        })
        .await
    }

    /// Submit command-bar text
    pub async fn submit(&mut self, query: String) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::Submit { query }).await
    }

    /// Submit a suggestion shortcut
    pub async fn select_suggestion(&mut self, index: usize) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::SuggestionSelected { index })
            .await
    }

    /// Switch the result view
    pub async fn select_view(&mut self, view: ResultView) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::ViewSelected { view }).await
    }

    /// Export the current result
    pub async fn export(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::ExportRequested).await
    }

    /// Notify Conductor that user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::QuitRequested).await
    }

    /// Apply finished requests (must be called regularly)
    pub async fn poll(&mut self) -> usize {
        self.conductor.poll_responses().await
    }

    /// Wait for the next in-flight request to finish
    pub async fn wait_for_response(&mut self) -> bool {
        self.conductor.wait_for_response().await.is_some()
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<ConductorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Get the current command-bar status
    pub fn status(&self) -> CommandBarStatus {
        self.conductor.status()
    }

    /// Get the recent queries, most recent first
    pub fn recent_queries(&self) -> &[String] {
        self.conductor.recent_queries()
    }

    /// Send raw surface event to Conductor
    pub async fn send_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.conductor.handle_event(event).await
    }
}
