//! On-disk cassette layout.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CassetteError;

/// One port call and what it returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in recording order within this cassette.
    pub seq: u64,
    /// Port name (`fs`, `git`, `clock` or `issues`).
    pub port: String,
    /// Port method.
    pub method: String,
    /// Call arguments. Informational only; replay ignores them.
    pub input: serde_json::Value,
    /// Return value, `{"Ok": v}` / `{"Err": msg}` for fallible calls.
    pub output: serde_json::Value,
}

/// A named, ordered recording of port calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Label, usually `<timestamp>-<port>`.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Commit of the inspected repository at recording time.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns [`CassetteError::Read`] or [`CassetteError::Parse`].
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&text)
            .map_err(|source| CassetteError::Parse { path: path.to_path_buf(), source })
    }
}
