//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ContextConfig};

/// Top-level CLI parser for `repo-context`.
#[derive(Debug, Parser)]
#[command(
    name = "repo-context",
    version,
    about = "Summarize a repository's stack, structure, conventions and hot files"
)]
pub struct Cli {
    /// Repository to inspect.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Print the JSON snapshot to stdout.
    #[arg(long)]
    pub json: bool,

    /// Print the Markdown report to stdout.
    #[arg(long)]
    pub md: bool,

    /// Print a one-paragraph summary to stdout.
    #[arg(long)]
    pub compact: bool,

    /// Write a single report to FILE (`.json` or `.md`).
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Hot-path window in days.
    #[arg(long, value_name = "N")]
    pub hot_days: Option<u32>,

    /// Only consider commits after DATE for conventions and recent changes.
    #[arg(long, value_name = "DATE")]
    pub since: Option<String>,
}

impl Cli {
    /// Applies flag overrides on top of `config` and re-validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is out of range.
    pub fn apply(&self, config: &mut ContextConfig) -> Result<(), ConfigError> {
        if let Some(days) = self.hot_days {
            config.hot_days = days;
        }
        if let Some(since) = &self.since {
            config.since = Some(since.clone());
        }
        config.validate()
    }

    /// Whether any stdout rendering was requested.
    #[must_use]
    pub fn prints_to_stdout(&self) -> bool {
        self.json || self.md || self.compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_directory() {
        let cli = Cli::parse_from(["repo-context"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(!cli.prints_to_stdout());
        assert!(cli.out.is_none());
    }

    #[test]
    fn parses_flags_in_any_position() {
        let cli = Cli::parse_from(["repo-context", "--md", "../web", "--json", "--hot-days", "7"]);
        assert_eq!(cli.path, PathBuf::from("../web"));
        assert!(cli.json && cli.md && !cli.compact);
        assert_eq!(cli.hot_days, Some(7));
    }

    #[test]
    fn out_requires_a_value() {
        assert!(Cli::try_parse_from(["repo-context", "--out"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["repo-context", "--hot-days", "14", "--since", "2024-01-01"]);
        let mut config = ContextConfig::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.hot_days, 14);
        assert_eq!(config.since.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn zero_hot_days_is_rejected() {
        let cli = Cli::parse_from(["repo-context", "--hot-days", "0"]);
        assert!(cli.apply(&mut ContextConfig::default()).is_err());
    }
}
