//! Commit message conventions.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::or_empty;
use crate::context::ServiceContext;

/// `type(scope)?: ` prefix of any commit type.
static TYPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(\(.+\))?:\s+").expect("valid type prefix pattern"));

/// Prefix of the conventional types counted toward the ratio.
static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|chore)(\(.+\))?:\s+.+").expect("valid conventional prefix pattern")
});

/// Ratio at or above which the history is labelled conventional.
const CONVENTIONAL_THRESHOLD: f64 = 0.5;
const COMMON_TYPE_LIMIT: usize = 3;

/// Overall commit style of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPattern {
    /// At least half the inspected commits are conventional.
    Conventional,
    /// Fewer than half are.
    NonConventional,
    /// There were no commits to inspect.
    Unknown,
}

impl fmt::Display for CommitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Conventional => "conventional",
            Self::NonConventional => "non-conventional",
            Self::Unknown => "unknown",
        })
    }
}

/// Commit style summary over a window of recent subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConventionProfile {
    /// Style label.
    pub commit_pattern: CommitPattern,
    /// Share of conventional commits, rounded to two decimals.
    pub conventional_commit_ratio: f64,
    /// Up to three most frequent commit types.
    pub common_types: Vec<String>,
}

impl Default for ConventionProfile {
    fn default() -> Self {
        Self {
            commit_pattern: CommitPattern::Unknown,
            conventional_commit_ratio: 0.0,
            common_types: Vec::new(),
        }
    }
}

/// Summarizes commit subjects. Blank subjects are ignored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_conventions<S: AsRef<str>>(subjects: &[S]) -> ConventionProfile {
    let messages: Vec<&str> =
        subjects.iter().map(|s| s.as_ref().trim()).filter(|s| !s.is_empty()).collect();
    if messages.is_empty() {
        return ConventionProfile::default();
    }

    let mut conventional = 0usize;
    let mut type_counts: Vec<(&str, usize)> = Vec::new();
    for message in &messages {
        let Some(commit_type) = TYPE_PREFIX.captures(message).and_then(|c| c.get(1)) else {
            continue;
        };
        let commit_type = commit_type.as_str();
        match type_counts.iter_mut().find(|(seen, _)| *seen == commit_type) {
            Some((_, count)) => *count += 1,
            None => type_counts.push((commit_type, 1)),
        }
        if CONVENTIONAL_PREFIX.is_match(message) {
            conventional += 1;
        }
    }

    type_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let ratio = (conventional as f64 / messages.len() as f64 * 100.0).round() / 100.0;

    ConventionProfile {
        commit_pattern: if ratio >= CONVENTIONAL_THRESHOLD {
            CommitPattern::Conventional
        } else {
            CommitPattern::NonConventional
        },
        conventional_commit_ratio: ratio,
        common_types: type_counts
            .into_iter()
            .take(COMMON_TYPE_LIMIT)
            .map(|(commit_type, _)| commit_type.to_string())
            .collect(),
    }
}

/// Conventions of the last `window` commits, optionally limited by `since`.
pub fn get_conventions(
    ctx: &ServiceContext,
    root: &Path,
    window: usize,
    since: Option<&str>,
) -> ConventionProfile {
    let log = or_empty(ctx.git.commit_subjects(root, window, since), "commit_subjects");
    let subjects: Vec<&str> = log.lines().collect();
    let profile = summarize_conventions(&subjects);
    debug!(
        subjects = subjects.len(),
        pattern = %profile.commit_pattern,
        ratio = profile.conventional_commit_ratio,
        "conventions summarized"
    );
    profile
}
