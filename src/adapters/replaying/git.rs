//! Replayed git queries.

use std::path::Path;

use super::Tape;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Answers git queries from a cassette.
pub struct ReplayingGitRepo {
    tape: Tape,
}

impl ReplayingGitRepo {
    /// Wraps a replayer holding `git` interactions.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { tape: Tape::new("git", replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn list_files(&self, _root: &Path) -> Result<Vec<String>, PortError> {
        self.tape.result("list_files")
    }

    fn changed_paths(&self, _root: &Path, _days: u32) -> Result<String, PortError> {
        self.tape.result("changed_paths")
    }

    fn commit_subjects(
        &self,
        _root: &Path,
        _limit: usize,
        _since: Option<&str>,
    ) -> Result<String, PortError> {
        self.tape.result("commit_subjects")
    }

    fn last_commit(&self, _root: &Path, _since: Option<&str>) -> Result<String, PortError> {
        self.tape.result("last_commit")
    }

    fn remote_branches(&self, _root: &Path) -> Result<String, PortError> {
        self.tape.result("remote_branches")
    }
}
