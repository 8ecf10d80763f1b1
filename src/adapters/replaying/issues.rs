//! Replayed issue tracker counts.

use std::path::Path;

use super::Tape;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::issues::IssueTracker;
use crate::ports::PortError;

/// Answers pull request and issue counts from a cassette.
pub struct ReplayingIssueTracker {
    tape: Tape,
}

impl ReplayingIssueTracker {
    /// Wraps a replayer holding `issues` interactions.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { tape: Tape::new("issues", replayer) }
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn open_pull_request_count(&self, _root: &Path) -> Result<u64, PortError> {
        self.tape.result("open_pull_request_count")
    }

    fn open_issue_count(&self, _root: &Path) -> Result<u64, PortError> {
        self.tape.result("open_issue_count")
    }
}
