//! Widgets
//!
//! - `command_bar`: input box, suggestion shortcuts, recent-query strip
//! - `result_pane`: status placeholders and the four result views
//! - `text_block`: scrollable wrapped text

pub mod command_bar;
pub mod result_pane;
pub mod text_block;

pub use command_bar::{CommandBar, RecentStrip, Suggestions};
pub use result_pane::ResultPane;
pub use text_block::{TextBlock, TextBlockState};
