//! Git repository port for version-control queries.

use std::path::Path;

use super::PortError;

/// Provides read access to a git repository.
///
/// Log queries return raw `git` output; turning that text into hot paths,
/// conventions and recent activity is the job of [`crate::history`].
pub trait GitRepo: Send + Sync {
    /// Lists tracked files plus untracked files that are not ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a work tree or `git` is unavailable.
    fn list_files(&self, root: &Path) -> Result<Vec<String>, PortError>;

    /// Returns the path-only log for commits made in the last `days` days.
    ///
    /// One changed path per line; commit boundaries show up as blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be retrieved.
    fn changed_paths(&self, root: &Path, days: u32) -> Result<String, PortError>;

    /// Returns up to `limit` commit subjects, newest first, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be retrieved.
    fn commit_subjects(
        &self,
        root: &Path,
        limit: usize,
        since: Option<&str>,
    ) -> Result<String, PortError>;

    /// Returns the newest commit as a `subject|hash|committer-date` record.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be retrieved.
    fn last_commit(&self, root: &Path, since: Option<&str>) -> Result<String, PortError>;

    /// Returns the raw `git branch -r` listing.
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be listed.
    fn remote_branches(&self, root: &Path) -> Result<String, PortError>;
}
