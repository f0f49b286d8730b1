//! GALAXRX TUI - Terminal command bar for pharmacy analytics
//!
//! A full-screen surface over the headless `galaxrx-core` Conductor: type a
//! question (or press F1-F6 for a suggestion), then browse the result as
//! summary, table, chart or CSV export.
//!
//! # Architecture
//!
//! - **ConductorClient**: embeds the Conductor, sends SurfaceEvents
//! - **Display**: state mirrored from ConductorMessages
//! - **Widgets**: command bar, suggestions, result pane
//! - **Theme**: GALAXRX palette

pub mod app;
pub mod conductor_client;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use conductor_client::ConductorClient;
