//! GALAXRX Core - Headless Command Bar for Pharmacy Analytics
//!
//! This crate holds everything behind the GALAXRX command bar, independent of
//! any UI framework: free-text intent routing, task execution, the
//! submission state machine, recent queries, result views and CSV export. It
//! also validates submissions for the contact endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                           │
//! │        ┌─────────┐                  ┌────────────────┐       │
//! │        │   TUI   │                  │    Headless    │       │
//! │        │(ratatui)│                  │    (tests)     │       │
//! │        └────┬────┘                  └───────┬────────┘       │
//! │             └───────────────┬───────────────┘                │
//! │                     SurfaceEvent (up)                        │
//! │                   ConductorMessage (down)                    │
//! └─────────────────────────────┼────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┼────────────────────────────────┐
//! │                      GALAXRX CORE                            │
//! │  ┌──────────────────────────┴─────────────────────────────┐  │
//! │  │                       Conductor                        │  │
//! │  │  ┌──────────┐  ┌──────────┐  ┌─────────┐  ┌─────────┐  │  │
//! │  │  │  Intent  │  │ Executor │  │ Recent  │  │  Views  │  │  │
//! │  │  │Classifier│  │  (mock)  │  │ Queries │  │ + CSV   │  │  │
//! │  │  └──────────┘  └──────────┘  └─────────┘  └─────────┘  │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use galaxrx_core::{Conductor, ConductorConfig, MockExecutor, SurfaceEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let mut conductor = Conductor::new(MockExecutor::new(), ConductorConfig::default(), tx);
//!
//!     conductor
//!         .handle_event(SurfaceEvent::Submit { query: "Forecast demand".into() })
//!         .await?;
//!     conductor.wait_for_response().await;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`tasks`]: Task kinds, requests and suggestion shortcuts
//! - [`response`]: Typed task responses
//! - [`intent`]: Keyword intent classifier
//! - [`backend`]: Task executor trait and the mock executor
//! - [`conductor`]: Command-bar state machine
//! - [`recent`]: Persisted recent-query list
//! - [`views`]: Result projections and CSV export
//! - [`contact`]: Contact submission validation
//! - [`config`]: TOML / environment configuration
//! - [`events`]: Events from UI surfaces to Conductor
//! - [`messages`]: Messages from Conductor to UI surfaces
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, axum, or any
//! other UI or HTTP framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod conductor;
pub mod config;
pub mod contact;
pub mod events;
pub mod intent;
pub mod messages;
pub mod recent;
pub mod response;
pub mod tasks;
pub mod views;

// Re-exports for convenience
pub use backend::{AssistantTopic, ExecutorError, MockExecutor, TaskExecutor, DEFAULT_MOCK_DELAY};
pub use conductor::{Conductor, ConductorConfig, GENERIC_ERROR};
pub use events::{SurfaceEvent, SurfaceType};
pub use intent::{IntentClassifier, DEFAULT_KEYWORDS, FALLBACK_TASK};
pub use messages::{CommandBarStatus, ConductorMessage, NotifyLevel, RequestId};
pub use recent::{RecentQueries, RecentQueryStore, RecentStoreError, MAX_RECENT_QUERIES};
pub use response::{ResponseError, TaskResponse};
pub use tasks::{Suggestion, TaskKind, TaskRequest, UnknownTaskKind, SUGGESTIONS};
pub use views::{
    CsvExport, ExportError, KpiCard, PaneContent, ResultView, SummaryView, TableView,
};

// Contact exports
pub use contact::{
    validate_contact, ContactFieldError, ContactResponse, ContactSubmission, IssueCode,
};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ConfigError,
    ConfigOverrides, ConfigSource, GalaxrxConfig, GalaxrxToml,
};
