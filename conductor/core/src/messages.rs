//! Conductor Messages
//!
//! Messages sent from the Conductor to UI surfaces. A surface keeps no
//! command-bar state of its own: it mirrors whatever these messages say and
//! draws it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::response::TaskResponse;
use crate::tasks::TaskKind;
use crate::views::ResultView;

/// Messages from Conductor to UI Surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ConductorMessage {
    // ============================================
    // Command Bar
    // ============================================
    /// Command-bar status changed
    Status {
        /// New status
        status: CommandBarStatus,
    },

    /// A submission was accepted and dispatched
    QueryAccepted {
        /// Request identifier
        request_id: RequestId,
        /// Submitted text
        query: String,
        /// Task the text was routed to
        task: TaskKind,
    },

    /// A request resolved; this is now the current result
    Result {
        /// Request that produced it
        request_id: RequestId,
        /// The response
        response: TaskResponse,
    },

    /// A request failed; the current result was cleared
    Error {
        /// Request that failed
        request_id: RequestId,
        /// User-facing message
        message: String,
    },

    /// Recent-query list changed
    RecentQueries {
        /// Entries, most recent first
        entries: Vec<String>,
    },

    // ============================================
    // Result Pane
    // ============================================
    /// Selected result view changed
    ViewChanged {
        /// Newly selected view
        view: ResultView,
    },

    /// Current result was written as CSV
    Exported {
        /// File written
        path: PathBuf,
        /// Data rows written
        rows: usize,
    },

    // ============================================
    // Session
    // ============================================
    /// Transient notification
    Notify {
        /// Severity
        level: NotifyLevel,
        /// Text
        message: String,
    },

    /// Surface should exit
    Quit {
        /// Optional farewell line
        message: Option<String>,
    },
}

/// Identifier of one dispatched request
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command-bar status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandBarStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last resolved request succeeded
    Success,
    /// The last resolved request failed
    Error,
}

impl CommandBarStatus {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Loading => "Analyzing...",
            Self::Success => "Done",
            Self::Error => "Error",
        }
    }
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}
