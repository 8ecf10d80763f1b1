//! Structured logging setup.
//!
//! Logs always go to stderr: stdout carries rendered reports for the CLI
//! and JSON-RPC frames for the tool server.

use std::io;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ContextConfig;

/// Ensures logging is only initialized once.
static INIT: Once = Once::new();

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for this crate's events.
    pub level: Level,
    /// Emit JSON lines instead of human-readable output.
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Level::WARN, use_json: false }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the given level name.
    ///
    /// Unknown names fall back to `warn`.
    #[must_use]
    pub fn from_level_name(name: &str) -> Self {
        Self { level: parse_level(name), ..Self::default() }
    }

    /// Level and format taken from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &ContextConfig) -> Self {
        Self { use_json: config.log_json, ..Self::from_level_name(&config.log_level) }
    }
}

/// Parses a log level name (case-insensitive), defaulting to `WARN`.
#[must_use]
pub fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Initializes the global subscriber. Later calls are ignored.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("repo_context={}", config.level.as_str().to_lowercase()))
        });

        let registry = tracing_subscriber::registry().with(filter);
        let layer = fmt::layer().with_writer(io::stderr).with_target(true);
        let result = if config.use_json {
            registry.with(layer.json()).try_init()
        } else {
            registry.with(layer).try_init()
        };
        if let Err(err) = result {
            eprintln!("Warning: logging already initialized: {err}");
        }
    });
}
