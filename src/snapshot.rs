//! Assembly of the full repository context snapshot.

use std::path::{Component, Path, PathBuf};

use chrono::SecondsFormat;
use serde::Serialize;
use tracing::info;

use crate::config::ContextConfig;
use crate::context::ServiceContext;
use crate::history::{self, ConventionProfile, HotPath, RecentChanges};
use crate::manifest::PackageManifest;
use crate::stack::{self, StackProfile};
use crate::structure::{self, StructureProfile};

/// Schema version of the snapshot format.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Fixed note addressed to coding agents reading the snapshot.
pub const AGENT_NOTES: &str = "AI coding agents: use existing project patterns, keep changes \
                               scoped, and follow detected test/commit conventions.";

/// Dependencies worth calling out, in report order.
const NOTABLE_DEPENDENCIES: &[&str] = &[
    "next",
    "react",
    "supabase-js",
    "vitest",
    "jest",
    "express",
    "fastapi",
    "django",
    "vue",
    "svelte",
];

/// Dependency counts from the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySummary {
    /// Number of runtime dependencies.
    pub direct: usize,
    /// Number of development dependencies.
    pub dev: usize,
    /// Watch-list dependencies that are declared.
    pub notable: Vec<String>,
}

impl DependencySummary {
    /// Summarizes a manifest; no manifest gives zero counts.
    #[must_use]
    pub fn from_manifest(manifest: Option<&PackageManifest>) -> Self {
        let Some(manifest) = manifest else {
            return Self::default();
        };
        Self {
            direct: manifest.dependencies.len(),
            dev: manifest.dev_dependencies.len(),
            notable: NOTABLE_DEPENDENCIES
                .iter()
                .filter(|dep| manifest.has_dependency(dep))
                .map(|dep| (*dep).to_string())
                .collect(),
        }
    }
}

/// One complete context snapshot of a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoContext {
    /// Snapshot schema version.
    pub version: String,
    /// Repository directory name.
    pub repo: String,
    /// Generation time, ISO-8601 UTC with milliseconds.
    pub generated: String,
    /// Detected stack.
    pub stack: StackProfile,
    /// Layout and size.
    pub structure: StructureProfile,
    /// Commit conventions.
    pub conventions: ConventionProfile,
    /// Most frequently changed files.
    pub hot_paths: Vec<HotPath>,
    /// Recent activity.
    pub recent_changes: RecentChanges,
    /// Dependency summary.
    pub dependencies: DependencySummary,
    /// Advisory note for coding agents.
    pub agents_md: String,
}

/// Makes `root` absolute without touching the filesystem.
#[must_use]
pub fn resolve_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}

/// Display name of a repository: the last segment of its absolute path.
#[must_use]
pub fn repo_name(root: &Path) -> String {
    let root = resolve_root(root);
    let mut segments = Vec::new();
    for component in root.components() {
        match component {
            Component::Normal(name) => segments.push(name),
            Component::ParentDir => {
                segments.pop();
            }
            _ => {}
        }
    }
    segments.last().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Builds the full snapshot of the repository at `root`.
pub fn build_repo_context(ctx: &ServiceContext, root: &Path, config: &ContextConfig) -> RepoContext {
    let root = resolve_root(root);
    let since = config.since.as_deref();

    let stack = stack::detect_stack(ctx, &root);
    let structure = structure::analyze_structure(ctx, &root, config);
    let hot_paths = history::get_hot_paths(ctx, &root, config.hot_days, config.hot_top_n);
    let recent_changes = history::get_recent_changes(ctx, &root, since);
    let conventions = history::get_conventions(ctx, &root, config.convention_window, since);
    let manifest = PackageManifest::load(ctx, &root);

    let context = RepoContext {
        version: SNAPSHOT_VERSION.to_string(),
        repo: repo_name(&root),
        generated: ctx.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        stack,
        structure,
        conventions,
        hot_paths,
        recent_changes,
        dependencies: DependencySummary::from_manifest(manifest.as_ref()),
        agents_md: AGENT_NOTES.to_string(),
    };
    info!(repo = %context.repo, files = context.structure.total_files, "context built");
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notable_dependencies_follow_watch_list_order() {
        let manifest = PackageManifest {
            dependencies: vec!["svelte".into(), "lodash".into(), "react".into()],
            dev_dependencies: vec!["vitest".into()],
            ..PackageManifest::default()
        };
        let summary = DependencySummary::from_manifest(Some(&manifest));
        assert_eq!(summary.direct, 3);
        assert_eq!(summary.dev, 1);
        assert_eq!(summary.notable, vec!["react", "vitest", "svelte"]);
    }

    #[test]
    fn missing_manifest_has_zero_counts() {
        assert_eq!(DependencySummary::from_manifest(None), DependencySummary::default());
    }

    #[test]
    fn repo_name_is_last_segment() {
        assert_eq!(repo_name(Path::new("/work/acme-web")), "acme-web");
        assert_eq!(repo_name(Path::new("/work/acme-web/")), "acme-web");
        assert_eq!(repo_name(Path::new("/work/acme-web/src/..")), "acme-web");
    }

    #[test]
    fn agent_note_text() {
        assert_eq!(
            AGENT_NOTES,
            "AI coding agents: use existing project patterns, keep changes scoped, and follow \
             detected test/commit conventions."
        );
    }
}
