//! GALAXRX TUI Entry Point
//!
//! Usage:
//!   galaxrx-tui [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>       Configuration file (default: ~/.config/galaxrx/galaxrx.toml)
//!   -l, --log-level <LEVEL>   Log level for the log file (default: info)
//!
//! Logs go to `galaxrx-tui.log` in the GALAXRX data directory; the terminal
//! itself belongs to the UI.

use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use galaxrx_core::config::{default_config_path, load_config_from_path, GalaxrxConfig};
use galaxrx_tui::App;

/// GALAXRX terminal command bar
#[derive(Parser, Debug)]
#[command(name = "galaxrx-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "GALAXRX_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "GALAXRX_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

/// Log file location
fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("galaxrx").join("galaxrx-tui.log"))
}

/// Initialize logging to a file
///
/// Without a data directory, log output is discarded.
fn init_logging(level: &str) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("galaxrx_tui={level},galaxrx_core={level}"))
    });

    let Some(path) = default_log_path() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .init();

    Ok(Some(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: galaxrx-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or an SSH");
        eprintln!("session was opened without -t.");
        std::process::exit(1);
    }

    let log_path = init_logging(&args.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log_path = ?log_path, "GALAXRX TUI starting");

    let config = load_config_from_path(args.config.or_else(default_config_path))
        .context("Failed to load configuration")?;
    tracing::info!(source = ?config.source(), "Configuration loaded");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &GalaxrxConfig,
) -> Result<()> {
    let mut app = App::new(config).await?;
    app.run(terminal).await?;

    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[36mGALAXRX:\x1b[0m {goodbye}\n");
    }

    Ok(())
}
