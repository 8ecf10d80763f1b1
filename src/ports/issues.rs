//! Issue tracker port for open work-item counts.

use std::path::Path;

use super::PortError;

/// Counts open work items in the repository's hosted issue tracker.
///
/// The tracker is optional: a missing CLI, no network or no remote all
/// surface as errors, which callers turn into an absent count.
pub trait IssueTracker: Send + Sync {
    /// Returns the number of open pull requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn open_pull_request_count(&self, root: &Path) -> Result<u64, PortError>;

    /// Returns the number of open issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn open_issue_count(&self, root: &Path) -> Result<u64, PortError>;
}
