//! Recorded issue tracker counts.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::Track;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{IssueTracker, PortError};

/// Writes every count lookup, including a missing or unauthenticated `gh`.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    track: Track,
}

impl RecordingIssueTracker {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, track: Track::new("issues", recorder) }
    }
}

impl IssueTracker for RecordingIssueTracker {
    fn open_pull_request_count(&self, root: &Path) -> Result<u64, PortError> {
        let result = self.inner.open_pull_request_count(root);
        self.track.result("open_pull_request_count", json!({ "root": root.display().to_string() }), &result);
        result
    }

    fn open_issue_count(&self, root: &Path) -> Result<u64, PortError> {
        let result = self.inner.open_issue_count(root);
        self.track.result("open_issue_count", json!({ "root": root.display().to_string() }), &result);
        result
    }
}
