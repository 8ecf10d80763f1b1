//! Accumulates interactions and writes them out as a YAML cassette.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use super::format::{Cassette, Interaction};

/// An in-progress cassette bound to its destination file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette named `name`, stamped with the inspected
    /// repository's `commit`, to be written to `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, commit: impl Into<String>) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Appends one interaction; sequence numbers follow call order.
    pub fn record(&mut self, port: impl Into<String>, method: impl Into<String>, input: Value, output: Value) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the cassette, stamping the finish time, and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be produced or the file cannot
    /// be written.
    pub fn finish(mut self) -> std::io::Result<PathBuf> {
        self.cassette.recorded_at = Utc::now();
        let yaml = serde_yaml::to_string(&self.cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "deadbeef");
        recorder.record("fs", "exists", json!({"path": "/repo/yarn.lock"}), json!(true));
        recorder.record("git", "remote_branches", json!({"root": "/repo"}), json!({"Ok": ""}));
        recorder.record("clock", "now", json!(null), json!("2025-06-15T10:00:00Z"));

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();

        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.commit, "deadbeef");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(cassette.interactions[1].port, "git");
    }

    #[test]
    fn finish_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cassettes/nested/clock.cassette.yaml");

        let recorder = CassetteRecorder::new(&path, "nested", "abc");
        assert_eq!(recorder.path(), path);
        recorder.finish().unwrap();
        assert!(path.is_file());
    }
}
