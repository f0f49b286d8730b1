//! TOML Configuration File Support
//!
//! Centralized configuration loading for GALAXRX, from an optional TOML file
//! at `~/.config/galaxrx/galaxrx.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [executor]
//! delay_ms = 1200
//!
//! [contact]
//! delay_ms = 1000
//!
//! [server]
//! listen_addr = "127.0.0.1:3000"
//!
//! [storage]
//! recent_path = "/home/me/.local/share/galaxrx/recent_queries.json"
//! export_dir = "/home/me/exports"
//!
//! [intent]
//! extra_keywords = [["price", "optimizePrices"], ["promo", "planPromotions"]]
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::DEFAULT_MOCK_DELAY;
use crate::conductor::ConductorConfig;
use crate::intent::IntentClassifier;
use crate::recent::RecentQueryStore;
use crate::tasks::TaskKind;

/// Simulated contact-endpoint latency
pub const DEFAULT_CONTACT_DELAY: Duration = Duration::from_millis(1000);

/// Default daemon listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[executor]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorToml {
    /// Simulated task latency in milliseconds
    pub delay_ms: Option<u64>,
}

/// `[contact]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactToml {
    /// Simulated contact-endpoint latency in milliseconds
    pub delay_ms: Option<u64>,
}

/// `[server]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerToml {
    /// Daemon listen address
    pub listen_addr: Option<String>,
}

/// `[storage]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageToml {
    /// Recent-query file
    pub recent_path: Option<PathBuf>,

    /// Directory CSV exports are written to
    pub export_dir: Option<PathBuf>,
}

/// `[intent]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentToml {
    /// `[keyword, task]` pairs appended after the built-in table
    pub extra_keywords: Option<Vec<(String, String)>>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxrxToml {
    /// Executor section
    pub executor: ExecutorToml,

    /// Contact endpoint section
    pub contact: ContactToml,

    /// Daemon section
    pub server: ServerToml,

    /// Storage section
    pub storage: StorageToml,

    /// Intent section
    pub intent: IntentToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration
///
/// Use [`load_config`] to load with proper priority handling.
#[derive(Clone, Debug)]
pub struct GalaxrxConfig {
    /// Simulated task latency
    pub executor_delay: Duration,

    /// Simulated contact-endpoint latency
    pub contact_delay: Duration,

    /// Daemon listen address
    pub listen_addr: SocketAddr,

    /// Recent-query file (`None` keeps the list in memory)
    pub recent_path: Option<PathBuf>,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,

    /// Keywords appended after the built-in table
    pub extra_keywords: Vec<(String, TaskKind)>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for GalaxrxConfig {
    fn default() -> Self {
        Self {
            executor_delay: DEFAULT_MOCK_DELAY,
            contact_delay: DEFAULT_CONTACT_DELAY,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            recent_path: RecentQueryStore::default_path(),
            export_dir: PathBuf::from("."),
            extra_keywords: Vec::new(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl GalaxrxConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Built-in keyword table followed by the configured extras
    #[must_use]
    pub fn classifier(&self) -> IntentClassifier {
        let mut classifier = IntentClassifier::new();
        for (keyword, kind) in &self.extra_keywords {
            classifier.push_keyword(keyword, *kind);
        }
        classifier
    }

    /// Settings for the [`crate::Conductor`]
    #[must_use]
    pub fn conductor_config(&self) -> ConductorConfig {
        ConductorConfig {
            export_dir: self.export_dir.clone(),
            ..ConductorConfig::default()
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/galaxrx/galaxrx.toml` or
/// `~/.config/galaxrx/galaxrx.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("galaxrx").join("galaxrx.toml"))
}

/// Load configuration from the default path, then the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<GalaxrxConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, then the environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read, parsed or
/// validated.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<GalaxrxConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with a custom environment lookup
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read, parsed or
/// validated.
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<GalaxrxConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GalaxrxConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: GalaxrxToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);

    Ok(config)
}

fn parse_listen_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("invalid listen_addr: {value:?}")))
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut GalaxrxConfig, toml: &GalaxrxToml) -> Result<(), ConfigError> {
    if let Some(ms) = toml.executor.delay_ms {
        config.executor_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.contact.delay_ms {
        config.contact_delay = Duration::from_millis(ms);
    }
    if let Some(ref addr) = toml.server.listen_addr {
        config.listen_addr = parse_listen_addr(addr)?;
    }
    if let Some(ref path) = toml.storage.recent_path {
        config.recent_path = Some(path.clone());
    }
    if let Some(ref dir) = toml.storage.export_dir {
        config.export_dir = dir.clone();
    }
    if let Some(ref extra) = toml.intent.extra_keywords {
        config.extra_keywords = extra
            .iter()
            .map(|(keyword, task)| {
                TaskKind::parse(task)
                    .map(|kind| (keyword.clone(), kind))
                    .ok_or_else(|| {
                        ConfigError::ValidationError(format!(
                            "unknown task {task:?} for keyword {keyword:?}"
                        ))
                    })
            })
            .collect::<Result<_, _>>()?;
    }
    Ok(())
}

/// Apply environment variable overrides to the config
///
/// Unparseable values are skipped with a warning.
fn apply_env_config<F>(config: &mut GalaxrxConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(delay) = env("GALAXRX_EXECUTOR_DELAY_MS") {
        match delay.parse::<u64>() {
            Ok(ms) => {
                config.executor_delay = Duration::from_millis(ms);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %delay, "Ignoring invalid GALAXRX_EXECUTOR_DELAY_MS"),
        }
    }
    if let Some(delay) = env("GALAXRX_CONTACT_DELAY_MS") {
        match delay.parse::<u64>() {
            Ok(ms) => {
                config.contact_delay = Duration::from_millis(ms);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %delay, "Ignoring invalid GALAXRX_CONTACT_DELAY_MS"),
        }
    }
    if let Some(addr) = env("GALAXRX_LISTEN_ADDR") {
        match parse_listen_addr(&addr) {
            Ok(addr) => {
                config.listen_addr = addr;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring GALAXRX_LISTEN_ADDR"),
        }
    }
    if let Some(path) = env("GALAXRX_RECENT_PATH") {
        config.recent_path = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
    if let Some(dir) = env("GALAXRX_EXPORT_DIR") {
        config.export_dir = PathBuf::from(dir);
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Listen address override
    pub listen_addr: Option<SocketAddr>,

    /// Executor delay override
    pub executor_delay: Option<Duration>,

    /// Contact delay override
    pub contact_delay: Option<Duration>,

    /// Export directory override
    pub export_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set listen address override
    #[must_use]
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    /// Set executor delay override
    #[must_use]
    pub fn with_executor_delay(mut self, delay: Duration) -> Self {
        self.executor_delay = Some(delay);
        self
    }

    /// Set contact delay override
    #[must_use]
    pub fn with_contact_delay(mut self, delay: Duration) -> Self {
        self.contact_delay = Some(delay);
        self
    }

    /// Set export directory override
    #[must_use]
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = Some(dir);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listen_addr.is_none()
            && self.executor_delay.is_none()
            && self.contact_delay.is_none()
            && self.export_dir.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut GalaxrxConfig) {
        if let Some(addr) = self.listen_addr {
            config.listen_addr = addr;
        }
        if let Some(delay) = self.executor_delay {
            config.executor_delay = delay;
        }
        if let Some(delay) = self.contact_delay {
            config.contact_delay = delay;
        }
        if let Some(ref dir) = self.export_dir {
            config.export_dir = dir.clone();
        }
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = GalaxrxConfig::default();
        assert_eq!(config.executor_delay, Duration::from_millis(1200));
        assert_eq!(config.contact_delay, Duration::from_millis(1000));
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            load_config_with_env(Some(PathBuf::from("/nonexistent/galaxrx.toml")), no_env)
                .unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[executor]
delay_ms = 50

[server]
listen_addr = "0.0.0.0:8080"

[storage]
export_dir = "/tmp/exports"

[intent]
extra_keywords = [["Price", "optimizePrices"]]
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.executor_delay, Duration::from_millis(50));
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(
            config.extra_keywords,
            vec![("Price".to_string(), TaskKind::OptimizePrices)]
        );

        let classifier = config.classifier();
        assert_eq!(classifier.classify("price check"), TaskKind::OptimizePrices);
        // built-ins still come first
        assert_eq!(
            classifier.classify("price of my stock"),
            TaskKind::OptimizeStock
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[executor]\ndelay_ms = 50\n");
        let env: HashMap<&str, &str> = [
            ("GALAXRX_EXECUTOR_DELAY_MS", "5"),
            ("GALAXRX_EXPORT_DIR", "/srv/out"),
        ]
        .into_iter()
        .collect();

        let config = load_config_with_env(Some(file.path().to_path_buf()), |key| {
            env.get(key).map(|v| (*v).to_string())
        })
        .unwrap();
        assert_eq!(config.executor_delay, Duration::from_millis(5));
        assert_eq!(config.export_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_invalid_env_value_is_ignored() {
        let config = load_config_with_env(None, |key| {
            (key == "GALAXRX_CONTACT_DELAY_MS").then(|| "soon".to_string())
        })
        .unwrap();
        assert_eq!(config.contact_delay, DEFAULT_CONTACT_DELAY);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_listen_addr_from_env() {
        let config = load_config_with_env(None, |key| {
            (key == "GALAXRX_LISTEN_ADDR").then(|| "127.0.0.1:9100".to_string())
        })
        .unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.source(), ConfigSource::Env);

        let config = load_config_with_env(None, |key| {
            (key == "GALAXRX_LISTEN_ADDR").then(|| "bogus".to_string())
        })
        .unwrap();
        assert_eq!(config.listen_addr, GalaxrxConfig::default().listen_addr);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_malformed_toml_errors() {
        let file = write_config("[executor\ndelay_ms = ");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_task_in_keywords_errors() {
        let file = write_config("[intent]\nextra_keywords = [[\"x\", \"doMagic\"]]\n");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_invalid_listen_addr_errors() {
        let file = write_config("[server]\nlisten_addr = \"not an address\"\n");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = GalaxrxConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config.source(), ConfigSource::Default);

        ConfigOverrides::new()
            .with_contact_delay(Duration::ZERO)
            .with_export_dir(PathBuf::from("out"))
            .apply(&mut config);
        assert_eq!(config.contact_delay, Duration::ZERO);
        assert_eq!(config.conductor_config().export_dir, PathBuf::from("out"));
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
