//! Cassette format for recording and replaying port interactions.
//!
//! Cassettes let tests and bug reports reproduce a pipeline run against a
//! repository without needing that repository, `git` or `gh` present.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading or saving cassettes.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// A cassette file could not be read.
    #[error("failed to read cassette file {}: {source}", path.display())]
    Read {
        /// Cassette path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A cassette file is not valid cassette YAML.
    #[error("failed to parse cassette file {}: {source}", path.display())]
    Parse {
        /// Cassette path.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A cassette or its directory could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A recording session would overwrite an earlier one.
    #[error("cassette directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    /// A recording adapter still holds the port's recorder.
    #[error("recording adapter for {0} is still alive")]
    StillShared(&'static str),
}
