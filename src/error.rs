//! Errors raised by the layers around the extraction pipeline.
//!
//! The pipeline itself never fails: every port error is absorbed where it
//! happens. These variants cover configuration, report output and the
//! cassette recording wrapper.

use std::path::PathBuf;

use thiserror::Error;

use crate::cassette::CassetteError;
use crate::config::ConfigError;

/// Errors from the CLI and tool-server surfaces.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Serializing the snapshot failed.
    #[error("failed to serialize repository context: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("failed to write {path}: {message}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// `--out` named a file that is neither `.json` nor `.md`.
    #[error("--out must end in .json or .md, got {0}")]
    UnsupportedOutput(PathBuf),

    /// The working directory could not be resolved.
    #[error("failed to resolve repository path: {0}")]
    Io(#[from] std::io::Error),

    /// Setting up or finishing a cassette recording failed.
    #[error("cassette recording failed: {0}")]
    Recording(#[from] CassetteError),
}
