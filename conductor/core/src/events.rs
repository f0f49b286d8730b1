//! Surface Events
//!
//! Events sent from UI surfaces to the Conductor. Surfaces report what the
//! user did; the Conductor decides what it means.

use serde::{Deserialize, Serialize};

use crate::views::ResultView;

/// Events from UI Surface to Conductor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Surface attached to the Conductor
    Connected {
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    /// User submitted the command bar
    Submit {
        /// Raw text, untrimmed
        query: String,
    },

    /// User picked a suggestion shortcut
    SuggestionSelected {
        /// Index into the suggestion list
        index: usize,
    },

    /// User switched result tabs
    ViewSelected {
        /// Selected view
        view: ResultView,
    },

    /// User asked to export the current result
    ExportRequested,

    /// User asked to quit
    QuitRequested,
}

/// Kind of surface attached to the Conductor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Terminal UI (ratatui/crossterm)
    Tui,
    /// Headless (for testing/automation)
    Headless,
}

impl SurfaceType {
    /// Human-readable name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tui => "Terminal",
            Self::Headless => "Headless",
        }
    }
}
