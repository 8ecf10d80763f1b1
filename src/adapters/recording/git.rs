//! Recorded git queries.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::Track;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{GitRepo, PortError};

/// Writes every git query with its arguments and raw output.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    track: Track,
}

impl RecordingGitRepo {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, track: Track::new("git", recorder) }
    }
}

impl GitRepo for RecordingGitRepo {
    fn list_files(&self, root: &Path) -> Result<Vec<String>, PortError> {
        let result = self.inner.list_files(root);
        self.track.result("list_files", json!({ "root": root.display().to_string() }), &result);
        result
    }

    fn changed_paths(&self, root: &Path, days: u32) -> Result<String, PortError> {
        let result = self.inner.changed_paths(root, days);
        self.track.result("changed_paths", json!({ "root": root.display().to_string(), "days": days }), &result);
        result
    }

    fn commit_subjects(
        &self,
        root: &Path,
        limit: usize,
        since: Option<&str>,
    ) -> Result<String, PortError> {
        let result = self.inner.commit_subjects(root, limit, since);
        let input = json!({ "root": root.display().to_string(), "limit": limit, "since": since });
        self.track.result("commit_subjects", input, &result);
        result
    }

    fn last_commit(&self, root: &Path, since: Option<&str>) -> Result<String, PortError> {
        let result = self.inner.last_commit(root, since);
        self.track.result("last_commit", json!({ "root": root.display().to_string(), "since": since }), &result);
        result
    }

    fn remote_branches(&self, root: &Path) -> Result<String, PortError> {
        let result = self.inner.remote_branches(root);
        self.track.result("remote_branches", json!({ "root": root.display().to_string() }), &result);
        result
    }
}
