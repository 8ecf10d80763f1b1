//! Files most often touched by recent commits.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::or_empty;
use crate::context::ServiceContext;

/// A file and the number of commits that touched it within the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotPath {
    /// Repository-relative path.
    pub file: String,
    /// Commit count, always at least 1.
    #[serde(rename = "commits_30d")]
    pub commits: u64,
}

/// Ranks the paths of a `--name-only` log by occurrence count.
///
/// Blank lines and lines starting with `merge ` are skipped. Equal counts
/// keep first-seen order; at most `top_n` entries are returned.
#[must_use]
pub fn parse_hot_paths(log: &str, top_n: usize) -> Vec<HotPath> {
    let mut counts: Vec<HotPath> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for line in log.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("merge ") {
            continue;
        }
        match index.get(line) {
            Some(&i) => counts[i].commits += 1,
            None => {
                index.insert(line, counts.len());
                counts.push(HotPath { file: line.to_string(), commits: 1 });
            }
        }
    }
    counts.sort_by(|a, b| b.commits.cmp(&a.commits));
    counts.truncate(top_n);
    counts
}

/// Hot paths of the repository at `root` over the last `days` days.
pub fn get_hot_paths(ctx: &ServiceContext, root: &Path, days: u32, top_n: usize) -> Vec<HotPath> {
    let log = or_empty(ctx.git.changed_paths(root, days), "changed_paths");
    let hot = parse_hot_paths(&log, top_n);
    debug!(days, hot_paths = hot.len(), "hot paths ranked");
    hot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::replay;
    use serde_json::json;

    fn hot(file: &str, commits: u64) -> HotPath {
        HotPath { file: file.into(), commits }
    }

    #[test]
    fn ranks_by_count() {
        let log = "src/index.ts\nsrc/index.ts\nsrc/utils.ts\nsrc/index.ts\n";
        assert_eq!(parse_hot_paths(log, 10), vec![hot("src/index.ts", 3), hot("src/utils.ts", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let log = "b.ts\n\na.ts\n\nc.ts\na.ts\nb.ts\n";
        assert_eq!(
            parse_hot_paths(log, 10),
            vec![hot("b.ts", 2), hot("a.ts", 2), hot("c.ts", 1)]
        );
    }

    #[test]
    fn merge_filter_is_narrow_and_case_sensitive() {
        let log = "merge branch 'x'\nMerge branch 'y'\n  src/a.ts  \n";
        assert_eq!(
            parse_hot_paths(log, 10),
            vec![hot("Merge branch 'y'", 1), hot("src/a.ts", 1)]
        );
    }

    #[test]
    fn truncates_to_top_n() {
        let log = "a\nb\nc\nd\na\n";
        let ranked = parse_hot_paths(log, 2);
        assert_eq!(ranked, vec![hot("a", 2), hot("b", 1)]);
    }

    #[test]
    fn blank_log_is_empty() {
        assert!(parse_hot_paths("", 10).is_empty());
        assert!(parse_hot_paths("\n  \nmerge x\n", 10).is_empty());
    }

    #[test]
    fn serializes_with_window_key() {
        assert_eq!(
            serde_json::to_value(hot("src/a.ts", 4)).unwrap(),
            json!({"file": "src/a.ts", "commits_30d": 4})
        );
    }

    #[test]
    fn reads_log_through_git_port() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = replay(
            dir.path(),
            &[("git", "changed_paths", json!({"Ok": "\nsrc/app.ts\nREADME.md\n\nsrc/app.ts\n"}))],
        );
        assert_eq!(
            get_hot_paths(&ctx, dir.path(), 30, 10),
            vec![hot("src/app.ts", 2), hot("README.md", 1)]
        );
    }

    #[test]
    fn git_failure_yields_no_hot_paths() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = replay(
            dir.path(),
            &[("git", "changed_paths", json!({"Err": "fatal: not a git repository"}))],
        );
        assert!(get_hot_paths(&ctx, dir.path(), 30, 10).is_empty());
    }
}
