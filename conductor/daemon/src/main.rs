//! GALAXRX Server Binary
//!
//! Serves `POST /api/contact` and `GET /health`.
//!
//! # Usage
//!
//! ```bash
//! # Start with the default address (127.0.0.1:3000)
//! galaxrx-server
//!
//! # Custom address and config file
//! galaxrx-server --listen 0.0.0.0:8080 --config /etc/galaxrx/galaxrx.toml
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use galaxrx_core::config::{default_config_path, load_config_from_path, ConfigOverrides};
use galaxrx_server::{router, serve, AppState};

/// GALAXRX contact server
#[derive(Parser, Debug)]
#[command(name = "galaxrx-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on (GALAXRX_LISTEN_ADDR is read by the config loader)
    #[arg(short = 'L', long, value_name = "ADDR")]
    listen: Option<SocketAddr>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "GALAXRX_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated contact processing delay in milliseconds
    #[arg(long, value_name = "MS")]
    contact_delay_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "GALAXRX_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

/// Initialize logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "galaxrx_server={level},galaxrx_core={level},tower_http={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!(error = %e, "Failed to install SIGTERM handler");
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, initiating shutdown");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("GALAXRX server starting");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.or_else(default_config_path);
    if let Some(ref path) = config_path {
        info!(config_path = ?path, "Config file");
    }
    let mut config = load_config_from_path(config_path).context("Failed to load configuration")?;

    let mut overrides = ConfigOverrides::new();
    if let Some(addr) = args.listen {
        overrides = overrides.with_listen_addr(addr);
    }
    if let Some(ms) = args.contact_delay_ms {
        overrides = overrides.with_contact_delay(Duration::from_millis(ms));
    }
    overrides.apply(&mut config);
    info!(source = ?config.source(), listen_addr = %config.listen_addr, "Configuration loaded");

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    let app = router(AppState::from(&config));
    let result = serve(listener, app, shutdown_signal()).await;

    match result {
        Ok(()) => {
            info!("GALAXRX server stopped cleanly");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Server stopped with error");
            Err(e).context("Server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_listen_flag_does_not_read_env() {
        let command = Args::command();
        let listen = command
            .get_arguments()
            .find(|arg| arg.get_id() == "listen")
            .unwrap();
        assert!(listen.get_env().is_none());
    }

    #[test]
    fn test_listen_flag_parses_address() {
        let args = Args::try_parse_from(["galaxrx-server", "--listen", "127.0.0.1:9000"]).unwrap();
        assert_eq!(args.listen.map(|a| a.port()), Some(9000));
    }
}
