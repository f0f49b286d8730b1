//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, frame tick)
//! - ConductorClient for command-bar state
//! - DisplayState for rendering
//!
//! The App only edits the input line locally. Everything else is a
//! SurfaceEvent sent to the embedded Conductor, and what gets drawn is
//! whatever the Conductor's messages say.

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use galaxrx_core::{GalaxrxConfig, MockExecutor, TaskExecutor, SUGGESTIONS};

use crate::conductor_client::ConductorClient;
use crate::display::DisplayState;
use crate::theme::{self, BORDER_SLATE, MUTED};
use crate::widgets::{CommandBar, RecentStrip, ResultPane, Suggestions, TextBlockState};

/// Frame interval for the event loop
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Lines moved per PageUp/PageDown in a long answer
const PAGE_SCROLL: i32 = 5;

const KEY_HINTS: &str = "Enter ask · F1-F6 ideas · Tab views · Ctrl+E export · Esc quit";

/// Main application state
pub struct App<E: TaskExecutor + 'static = MockExecutor> {
    /// Is the app still running?
    running: bool,

    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient<E>,
    /// Display state derived from ConductorMessages
    display: DisplayState,

    /// Command-bar input line
    input: String,
    /// Position in the recent list while browsing with Up/Down
    history_cursor: Option<usize>,
    /// Scroll state of a long assistant answer
    answer_scroll: TextBlockState,

    /// Last frame time (for notification timers)
    last_frame: Instant,
}

impl App<MockExecutor> {
    /// Create an App backed by the mock executor
    pub async fn new(config: &GalaxrxConfig) -> anyhow::Result<Self> {
        let client = ConductorClient::from_config(config).await;
        Self::with_client(client).await
    }
}

impl<E: TaskExecutor + 'static> App<E> {
    /// Create an App around an existing client and connect it
    pub async fn with_client(conductor: ConductorClient<E>) -> anyhow::Result<Self> {
        let mut app = Self {
            running: true,
            conductor,
            display: DisplayState::new(),
            input: String::new(),
            history_cursor: None,
            answer_scroll: TextBlockState::default(),
            last_frame: Instant::now(),
        };
        app.conductor.connect().await?;
        app.process_conductor_messages();
        Ok(app)
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Terminal event error");
                        }
                        None => {
                            tracing::info!("Terminal event stream closed");
                            self.running = false;
                        }
                    }
                }

                _ = tokio::time::sleep(FRAME_DURATION) => {}
            }

            self.tick().await;
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Apply finished requests, drain messages and advance timers
    pub async fn tick(&mut self) {
        self.conductor.poll().await;
        self.process_conductor_messages();

        let now = Instant::now();
        self.display.update(now - self.last_frame);
        self.last_frame = now;
    }

    /// Block until the next in-flight request finishes, then apply it
    pub async fn wait_for_response(&mut self) -> bool {
        let applied = self.conductor.wait_for_response().await;
        self.process_conductor_messages();
        applied
    }

    /// Process all pending messages from the Conductor
    fn process_conductor_messages(&mut self) {
        for msg in self.conductor.recv_all() {
            if let galaxrx_core::ConductorMessage::Result { .. } = msg {
                self.answer_scroll.reset();
            }
            self.display.apply_message(msg);
        }
        if self.display.quitting {
            self.running = false;
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let result = match key.code {
            // Quit
            KeyCode::Esc => self.quit().await,
            KeyCode::Char('c') if ctrl => self.quit().await,

            // Command bar
            KeyCode::Enter => {
                self.history_cursor = None;
                self.conductor.submit(self.input.clone()).await
            }
            KeyCode::Char('k') if ctrl => {
                self.input.clear();
                self.history_cursor = None;
                Ok(())
            }
            KeyCode::Char('e') if ctrl => self.conductor.export().await,
            KeyCode::F(n) if (1..=SUGGESTIONS.len()).contains(&usize::from(n)) => {
                let index = usize::from(n) - 1;
                self.input = SUGGESTIONS[index].text.to_string();
                self.history_cursor = None;
                self.conductor.select_suggestion(index).await
            }
            KeyCode::Up => {
                self.browse_recent(true);
                Ok(())
            }
            KeyCode::Down => {
                self.browse_recent(false);
                Ok(())
            }

            // Result pane
            KeyCode::Tab if self.display.result.is_some() => {
                self.conductor.select_view(self.display.view.next()).await
            }
            KeyCode::BackTab if self.display.result.is_some() => {
                self.conductor.select_view(self.display.view.prev()).await
            }
            KeyCode::PageUp => {
                self.answer_scroll.scroll(-PAGE_SCROLL);
                Ok(())
            }
            KeyCode::PageDown => {
                self.answer_scroll.scroll(PAGE_SCROLL);
                Ok(())
            }

            // Typing
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                self.history_cursor = None;
                Ok(())
            }
            KeyCode::Backspace => {
                self.input.pop();
                Ok(())
            }

            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Conductor rejected surface event");
        }
        self.process_conductor_messages();
    }

    async fn quit(&mut self) -> anyhow::Result<()> {
        let result = self.conductor.request_quit().await;
        self.running = false;
        result
    }

    /// Step through recent queries into the input line
    ///
    /// `older` moves away from the most recent entry. Moving past the newest
    /// entry leaves browsing and clears the input.
    fn browse_recent(&mut self, older: bool) {
        let recent = &self.display.recent;
        if recent.is_empty() {
            return;
        }
        self.history_cursor = match (self.history_cursor, older) {
            (None, true) => Some(0),
            (None, false) => None,
            (Some(i), true) => Some((i + 1).min(recent.len() - 1)),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
        match self.history_cursor {
            Some(i) => self.input = recent[i].clone(),
            None => self.input.clear(),
        }
    }

    /// Render the UI
    pub fn draw(&mut self, frame: &mut Frame) {
        let [bar, ideas, recent, pane, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(CommandBar::new(&self.input, self.display.status), bar);
        frame.render_widget(Suggestions, ideas);
        frame.render_widget(
            RecentStrip::new(&self.display.recent, self.history_cursor),
            recent,
        );
        frame.render_stateful_widget(
            ResultPane::new(self.display.pane()).last_export(self.display.last_export.as_ref()),
            pane,
            &mut self.answer_scroll,
        );
        frame.render_widget(self.status_line(), status);
    }

    fn status_line(&self) -> Paragraph<'static> {
        if let Some(ref notification) = self.display.notification {
            return Paragraph::new(Line::from(Span::styled(
                format!(" {}", notification.message),
                theme::notify_style(notification.level),
            )));
        }

        let mut spans = vec![Span::styled(
            format!(" {}", self.display.status.description()),
            theme::status_style(self.display.status),
        )];
        if let Some(ref query) = self.display.last_query {
            spans.push(Span::styled(
                format!(" → {}", query.task.label()),
                Style::default().fg(MUTED),
            ));
        }
        spans.push(Span::styled(
            format!(" | {KEY_HINTS}"),
            Style::default().fg(BORDER_SLATE),
        ));
        Paragraph::new(Line::from(spans))
    }

    // === Accessors ===

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current input line
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Display state mirrored from the Conductor
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.display.goodbye.as_deref()
    }
}
