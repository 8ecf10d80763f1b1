//! Snapshot renderers: JSON, Markdown and a one-paragraph summary.

use std::fmt::Write as _;

use crate::error::ContextError;
use crate::snapshot::RepoContext;

/// Number of hot paths mentioned in the compact summary.
const COMPACT_HOT_PATHS: usize = 3;

/// Pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(context: &RepoContext) -> Result<String, ContextError> {
    let mut json = serde_json::to_string_pretty(context)?;
    json.push('\n');
    Ok(json)
}

fn join_or<T: ToString>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn or_unknown<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "Unknown".to_string(), ToString::to_string)
}

/// Markdown document describing the snapshot.
#[must_use]
pub fn to_markdown(context: &RepoContext) -> String {
    let stack = &context.stack;
    let structure = &context.structure;
    let conventions = &context.conventions;
    let recent = &context.recent_changes;
    let deps = &context.dependencies;

    let hot_paths = if context.hot_paths.is_empty() {
        "- None".to_string()
    } else {
        context
            .hot_paths
            .iter()
            .map(|hot| format!("- {} ({} commits/30d)", hot.file, hot.commits))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let lines = [
        "# Repository Context".to_string(),
        String::new(),
        format!("- **Repo**: {}", context.repo),
        format!("- **Generated**: {}", context.generated),
        String::new(),
        "## Stack".to_string(),
        format!("- **Languages**: {}", join_or(&stack.languages, "Unknown")),
        format!("- **Frameworks**: {}", join_or(&stack.frameworks, "None")),
        format!("- **Runtime**: {}", or_unknown(stack.runtime.as_ref())),
        format!("- **Package Manager**: {}", or_unknown(stack.package_manager.as_ref())),
        format!("- **Test Framework**: {}", or_unknown(stack.test_framework.as_ref())),
        format!("- **CI**: {}", or_unknown(stack.ci.as_ref())),
        String::new(),
        "## Structure".to_string(),
        format!("- **Entry Points**: {}", join_or(&structure.entry_points, "None")),
        format!("- **Config Files**: {}", join_or(&structure.config_files, "None")),
        format!("- **Test Dirs**: {}", join_or(&structure.test_dirs, "None")),
        format!("- **Total Files**: {}", structure.total_files),
        format!("- **Total Lines**: {}", structure.total_lines),
        String::new(),
        "## Conventions".to_string(),
        format!("- **Commit Pattern**: {}", conventions.commit_pattern),
        format!("- **Conventional Ratio**: {}", conventions.conventional_commit_ratio),
        format!("- **Common Commit Types**: {}", join_or(&conventions.common_types, "None")),
        String::new(),
        "## Hot Paths".to_string(),
        hot_paths,
        String::new(),
        "## Recent Changes".to_string(),
        format!("- **Last Commit**: {}", recent.last_commit),
        format!("- **SHA**: {}", recent.last_commit_sha),
        format!("- **Date**: {}", recent.last_commit_date),
        format!("- **Active Branches**: {}", join_or(&recent.active_branches, "None")),
        format!("- **Open PRs**: {}", or_unknown(recent.open_prs.as_ref())),
        format!("- **Open Issues**: {}", or_unknown(recent.open_issues.as_ref())),
        String::new(),
        "## Dependencies".to_string(),
        format!("- **Direct**: {}", deps.direct),
        format!("- **Dev**: {}", deps.dev),
        format!("- **Notable**: {}", join_or(&deps.notable, "None")),
        String::new(),
        "## Agent Notes".to_string(),
        context.agents_md.clone(),
    ];

    let mut markdown = lines.join("\n");
    markdown.push('\n');
    markdown
}

/// Single-paragraph summary for prompts and status lines.
#[must_use]
pub fn to_compact(context: &RepoContext) -> String {
    let stack = &context.stack;
    let mut summary = format!("{}: {}", context.repo, join_or(&stack.languages, "unknown language"));

    if !stack.frameworks.is_empty() {
        let _ = write!(summary, " using {}", join_or(&stack.frameworks, ""));
    }
    if let Some(runtime) = &stack.runtime {
        let _ = write!(summary, " on {runtime}");
    }
    if let Some(pm) = stack.package_manager {
        let _ = write!(summary, " ({pm})");
    }
    summary.push('.');

    if let Some(test) = stack.test_framework {
        let _ = write!(summary, " Tests: {test}.");
    }
    if let Some(ci) = stack.ci {
        let _ = write!(summary, " CI: {ci}.");
    }
    let _ = write!(
        summary,
        " {} files, {} lines. Commits: {} ({}).",
        context.structure.total_files,
        context.structure.total_lines,
        context.conventions.commit_pattern,
        context.conventions.conventional_commit_ratio,
    );

    let hot: Vec<&str> =
        context.hot_paths.iter().take(COMPACT_HOT_PATHS).map(|h| h.file.as_str()).collect();
    if !hot.is_empty() {
        let _ = write!(summary, " Hot: {}.", hot.join(", "));
    }
    summary.push('\n');
    summary
}
