//! Live git adapter using `git` CLI commands.

use std::path::Path;

use super::run_in;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

/// Builds `git log` arguments with an optional `--since` filter placed
/// before the remaining options.
fn log_args(since: Option<&str>, rest: &[&str]) -> Vec<String> {
    let mut args = vec!["log".to_string()];
    if let Some(since) = since {
        args.push(format!("--since={since}"));
    }
    args.extend(rest.iter().map(ToString::to_string));
    args
}

impl GitRepo for LiveGitRepo {
    fn list_files(&self, root: &Path) -> Result<Vec<String>, PortError> {
        let args = ["ls-files", "--cached", "--others", "--exclude-standard"].map(String::from);
        let output = run_in(root, "git", &args)?;
        Ok(output.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn changed_paths(&self, root: &Path, days: u32) -> Result<String, PortError> {
        let since = format!("{days}.days.ago");
        let args = log_args(Some(&since), &["-M", "--name-only", "--pretty=format:"]);
        run_in(root, "git", &args)
    }

    fn commit_subjects(
        &self,
        root: &Path,
        limit: usize,
        since: Option<&str>,
    ) -> Result<String, PortError> {
        let limit = format!("-{limit}");
        let args = log_args(since, &[&limit, "--pretty=format:%s"]);
        run_in(root, "git", &args)
    }

    fn last_commit(&self, root: &Path, since: Option<&str>) -> Result<String, PortError> {
        let args = log_args(since, &["-1", "--pretty=format:%s|%H|%ci"]);
        Ok(run_in(root, "git", &args)?.trim().to_string())
    }

    fn remote_branches(&self, root: &Path) -> Result<String, PortError> {
        run_in(root, "git", &["branch".to_string(), "-r".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_filter_precedes_format_options() {
        let args = log_args(Some("2024-01-01"), &["-20", "--pretty=format:%s"]);
        assert_eq!(args, vec!["log", "--since=2024-01-01", "-20", "--pretty=format:%s"]);
    }

    #[test]
    fn log_args_without_since() {
        assert_eq!(log_args(None, &["-1"]), vec!["log", "-1"]);
    }
}
