//! Most recent activity: last commit, active branches, open work items.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::or_empty;
use crate::context::ServiceContext;
use crate::ports::PortError;

const PRIMARY_BRANCHES: &[&str] = &["main", "master", "HEAD -> origin/main", "HEAD -> origin/master"];
const MAX_ACTIVE_BRANCHES: usize = 5;

/// Recent activity in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentChanges {
    /// Subject of the newest commit, or empty.
    pub last_commit: String,
    /// Full hash of the newest commit, or empty.
    pub last_commit_sha: String,
    /// Committer date of the newest commit, or empty.
    pub last_commit_date: String,
    /// Remote branches other than the primary one, at most five.
    pub active_branches: Vec<String>,
    /// Open pull requests, when the issue tracker could be queried.
    pub open_prs: Option<u64>,
    /// Open issues, when the issue tracker could be queried.
    pub open_issues: Option<u64>,
}

/// Splits a `subject|hash|date` record. Missing parts are empty.
///
/// Fields are taken from the right, not by position: the date is the last
/// field and the hash the one before it, so a subject containing `|` keeps
/// its pipes instead of spilling into the hash. A record with one field is
/// all subject; with two, subject and hash.
#[must_use]
pub fn parse_last_commit(record: &str) -> (String, String, String) {
    let record = record.trim();
    if record.is_empty() {
        return (String::new(), String::new(), String::new());
    }
    let parts: Vec<&str> = record.split('|').collect();
    match parts.len() {
        1 => (parts[0].to_string(), String::new(), String::new()),
        2 => (parts[0].to_string(), parts[1].to_string(), String::new()),
        n => (parts[..n - 2].join("|"), parts[n - 2].to_string(), parts[n - 1].to_string()),
    }
}

/// Remote branch names without the `origin/` prefix, primary branches excluded.
#[must_use]
pub fn parse_active_branches(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix("origin/").unwrap_or(line)
        })
        .filter(|branch| !branch.is_empty() && !PRIMARY_BRANCHES.contains(branch))
        .take(MAX_ACTIVE_BRANCHES)
        .map(String::from)
        .collect()
}

fn optional_count(result: Result<u64, PortError>, operation: &str) -> Option<u64> {
    match result {
        Ok(count) => Some(count),
        Err(err) => {
            debug!(operation, error = %err, "issue tracker unavailable");
            None
        }
    }
}

/// Recent activity of the repository at `root`.
pub fn get_recent_changes(ctx: &ServiceContext, root: &Path, since: Option<&str>) -> RecentChanges {
    let record = or_empty(ctx.git.last_commit(root, since), "last_commit");
    let (last_commit, last_commit_sha, last_commit_date) = parse_last_commit(&record);
    let branches = or_empty(ctx.git.remote_branches(root), "remote_branches");

    RecentChanges {
        last_commit,
        last_commit_sha,
        last_commit_date,
        active_branches: parse_active_branches(&branches),
        open_prs: optional_count(ctx.issues.open_pull_request_count(root), "open_pull_request_count"),
        open_issues: optional_count(ctx.issues.open_issue_count(root), "open_issue_count"),
    }
}
