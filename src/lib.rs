//! Core library for the `repo-context` CLI and tool server.
//!
//! [`snapshot::build_repo_context`] runs the whole extraction pipeline:
//! stack detection, structure analysis and history mining, all through the
//! port traits bundled in [`context::ServiceContext`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod history;
pub mod logging;
pub mod manifest;
pub mod mcp;
pub mod ports;
pub mod render;
pub mod snapshot;
pub mod stack;
pub mod structure;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::ContextConfig;
use crate::logging::LoggingConfig;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    let mut config = ContextConfig::from_env().map_err(|err| err.to_string())?;
    cli.apply(&mut config).map_err(|err| err.to_string())?;
    logging::init_logging(&LoggingConfig::from_config(&config));

    commands::dispatch(&cli, &config).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_help() {
        assert!(run(["repo-context", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_flag() {
        let err = run(["repo-context", "--verbose-please"]).unwrap_err();
        assert!(err.contains("--verbose-please"));
    }

    #[test]
    fn run_rejects_zero_hot_days() {
        let err = run(["repo-context", "--hot-days", "0"]).unwrap_err();
        assert!(err.contains("hot_days"));
    }
}
