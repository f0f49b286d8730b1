//! Display State Types
//!
//! The TUI keeps no command-bar logic of its own. `DisplayState` mirrors the
//! conductor's messages and the renderer draws from it.
//!
//! - `DisplayState`: status, current result, selected view, recent queries
//! - `DisplayNotification`: a transient status-line message
//! - `DisplayExport`: the last CSV written

use std::path::PathBuf;
use std::time::Duration;

use galaxrx_core::views::{self, PaneContent};
use galaxrx_core::{
    CommandBarStatus, ConductorMessage, NotifyLevel, ResultView, TaskKind, TaskResponse,
};

/// How long a notification stays on the status line
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// A notification to display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
}

/// The last export written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayExport {
    /// File written
    pub path: PathBuf,
    /// Data rows
    pub rows: usize,
}

/// The submission currently shown in the command bar header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayQuery {
    /// Submitted text
    pub text: String,
    /// Task it was routed to
    pub task: TaskKind,
}

/// The full display state for the TUI
#[derive(Debug, Default)]
pub struct DisplayState {
    /// Command-bar status
    pub status: CommandBarStatus,
    /// Current result
    pub result: Option<TaskResponse>,
    /// Current error message
    pub error: Option<String>,
    /// Selected result view
    pub view: ResultView,
    /// Recent queries, most recent first
    pub recent: Vec<String>,
    /// Most recently accepted submission
    pub last_query: Option<DisplayQuery>,
    /// Last export written
    pub last_export: Option<DisplayExport>,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Set once the conductor says goodbye
    pub quitting: bool,
    /// Farewell line from the conductor
    pub goodbye: Option<String>,
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a ConductorMessage to update display state
    pub fn apply_message(&mut self, msg: ConductorMessage) {
        match msg {
            ConductorMessage::Status { status } => {
                self.status = status;
                if status == CommandBarStatus::Loading {
                    self.result = None;
                    self.error = None;
                }
            }
            ConductorMessage::QueryAccepted { query, task, .. } => {
                self.last_query = Some(DisplayQuery { text: query, task });
            }
            ConductorMessage::Result { response, .. } => {
                self.result = Some(response);
                self.error = None;
            }
            ConductorMessage::Error { message, .. } => {
                self.result = None;
                self.error = Some(message);
            }
            ConductorMessage::RecentQueries { entries } => {
                self.recent = entries;
            }
            ConductorMessage::ViewChanged { view } => {
                self.view = view;
            }
            ConductorMessage::Exported { path, rows } => {
                self.last_export = Some(DisplayExport { path, rows });
            }
            ConductorMessage::Notify { level, message } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message,
                    remaining: NOTIFICATION_TTL,
                });
            }
            ConductorMessage::Quit { message } => {
                // The app will handle quitting
                self.quitting = true;
                self.goodbye = message;
            }
        }
    }

    /// Count down the notification timer
    pub fn update(&mut self, delta: Duration) {
        if let Some(ref mut notification) = self.notification {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    /// What the result pane should draw
    pub fn pane(&self) -> PaneContent<'_> {
        views::pane_content(
            self.status,
            self.result.as_ref(),
            self.error.as_deref(),
            self.view,
        )
    }
}
