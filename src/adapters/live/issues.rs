//! Live adapter for the `IssueTracker` port backed by the GitHub CLI.

use std::path::Path;

use super::run_in;
use crate::ports::issues::IssueTracker;
use crate::ports::PortError;

/// Live issue tracker that asks `gh` for open item counts.
pub struct LiveIssueTracker;

/// Runs `gh <kind> list` and parses the `length` it reports.
fn count_open(root: &Path, kind: &str) -> Result<u64, PortError> {
    let args = [kind, "list", "--json", "number", "--jq", "length"].map(String::from);
    let output = run_in(root, "gh", &args)?;
    parse_count(&output)
}

/// Parses a bare integer count from CLI output.
fn parse_count(output: &str) -> Result<u64, PortError> {
    output
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("unexpected count output {:?}: {e}", output.trim()).into())
}

impl IssueTracker for LiveIssueTracker {
    fn open_pull_request_count(&self, root: &Path) -> Result<u64, PortError> {
        count_open(root, "pr")
    }

    fn open_issue_count(&self, root: &Path) -> Result<u64, PortError> {
        count_open(root, "issue")
    }
}
