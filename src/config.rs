//! Pipeline configuration.
//!
//! The policy constants of the extraction pipeline (history windows, top-N
//! cut-offs, the line-count size ceiling) live here. Values are resolved in
//! three layers: built-in defaults, then `REPO_CONTEXT_*` environment
//! variables, then command-line flags applied by the caller.
//!
//! # Environment Variables
//!
//! - `REPO_CONTEXT_HOT_DAYS`: hot-path window in days - default: 30
//! - `REPO_CONTEXT_HOT_TOP_N`: number of hot paths reported - default: 10
//! - `REPO_CONTEXT_CONVENTION_WINDOW`: commit subjects inspected - default: 20
//! - `REPO_CONTEXT_MAX_FILE_BYTES`: files above this size count 0 lines - default: 1000000
//! - `REPO_CONTEXT_SINCE`: `git log --since` filter for conventions and recent changes
//! - `REPO_CONTEXT_LOG`: log level - default: "warn"
//! - `REPO_CONTEXT_LOG_FORMAT`: "json" for JSON log lines - default: text

use std::env;

use thiserror::Error;

/// Default hot-path window in days.
pub const DEFAULT_HOT_DAYS: u32 = 30;
/// Default number of hot paths reported.
pub const DEFAULT_HOT_TOP_N: usize = 10;
/// Default number of commit subjects inspected for conventions.
pub const DEFAULT_CONVENTION_WINDOW: usize = 20;
/// Default per-file size ceiling for line counting.
pub const DEFAULT_MAX_LINE_COUNT_BYTES: u64 = 1_000_000;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("Failed to parse {field}={value:?}: expected a positive integer")]
    Parse {
        /// Environment variable name.
        field: String,
        /// The offending value.
        value: String,
    },

    /// A numeric setting is out of range.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Tunable policy values for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Hot-path window in days.
    pub hot_days: u32,
    /// Maximum number of hot paths reported.
    pub hot_top_n: usize,
    /// Number of most recent commit subjects inspected for conventions.
    pub convention_window: usize,
    /// Files larger than this many bytes contribute zero lines.
    pub max_line_count_bytes: u64,
    /// Optional `git log --since` filter for conventions and recent changes.
    pub since: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            hot_days: DEFAULT_HOT_DAYS,
            hot_top_n: DEFAULT_HOT_TOP_N,
            convention_window: DEFAULT_CONVENTION_WINDOW,
            max_line_count_bytes: DEFAULT_MAX_LINE_COUNT_BYTES,
            since: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl ContextConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparsable or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary key lookup, falling back
    /// to defaults for unset keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is unparsable or out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(days) = parse_var(&lookup, "REPO_CONTEXT_HOT_DAYS")? {
            config.hot_days = days;
        }
        if let Some(top_n) = parse_var(&lookup, "REPO_CONTEXT_HOT_TOP_N")? {
            config.hot_top_n = top_n;
        }
        if let Some(window) = parse_var(&lookup, "REPO_CONTEXT_CONVENTION_WINDOW")? {
            config.convention_window = window;
        }
        if let Some(bytes) = parse_var(&lookup, "REPO_CONTEXT_MAX_FILE_BYTES")? {
            config.max_line_count_bytes = bytes;
        }
        config.since = lookup("REPO_CONTEXT_SINCE").filter(|s| !s.trim().is_empty());
        if let Some(level) = lookup("REPO_CONTEXT_LOG") {
            config.log_level = level.to_lowercase();
        }
        if let Some(format) = lookup("REPO_CONTEXT_LOG_FORMAT") {
            config.log_json = format.trim().eq_ignore_ascii_case("json");
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that every window and cut-off is at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationFailed`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hot_days == 0 {
            return Err(ConfigError::ValidationFailed("hot_days must be at least 1".into()));
        }
        if self.hot_top_n == 0 {
            return Err(ConfigError::ValidationFailed("hot_top_n must be at least 1".into()));
        }
        if self.convention_window == 0 {
            return Err(ConfigError::ValidationFailed(
                "convention_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Parse { field: key.to_string(), value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_observed_policy() {
        let config = ContextConfig::default();
        assert_eq!(config.hot_days, 30);
        assert_eq!(config.hot_top_n, 10);
        assert_eq!(config.convention_window, 20);
        assert_eq!(config.max_line_count_bytes, 1_000_000);
        assert_eq!(config.since, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ContextConfig::from_lookup(lookup(&[
            ("REPO_CONTEXT_HOT_DAYS", "7"),
            ("REPO_CONTEXT_HOT_TOP_N", " 3 "),
            ("REPO_CONTEXT_SINCE", "2 weeks ago"),
            ("REPO_CONTEXT_LOG", "DEBUG"),
            ("REPO_CONTEXT_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.hot_days, 7);
        assert_eq!(config.hot_top_n, 3);
        assert_eq!(config.convention_window, 20);
        assert_eq!(config.since.as_deref(), Some("2 weeks ago"));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn unparsable_value_is_an_error() {
        let err = ContextConfig::from_lookup(lookup(&[("REPO_CONTEXT_HOT_DAYS", "thirty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref field, .. } if field == "REPO_CONTEXT_HOT_DAYS"));
    }

    #[test]
    fn zero_window_fails_validation() {
        let err = ContextConfig::from_lookup(lookup(&[("REPO_CONTEXT_CONVENTION_WINDOW", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("convention_window"));
    }

    #[test]
    fn blank_since_is_ignored() {
        let config = ContextConfig::from_lookup(lookup(&[("REPO_CONTEXT_SINCE", "  ")])).unwrap();
        assert_eq!(config.since, None);
    }
}
