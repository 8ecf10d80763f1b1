//! Structure analysis: entry points, config files, test directories and size.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ContextConfig;
use crate::context::ServiceContext;
use crate::files;
use crate::manifest::PackageManifest;

const CONVENTIONAL_ENTRY_POINTS: &[&str] = &["src/index.ts", "src/app/page.tsx", "src/main.ts"];

const CONFIG_CANDIDATES: &[&str] = &[
    "tsconfig.json",
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "vite.config.js",
    "vite.config.ts",
    "vite.config.mjs",
    ".env.example",
    "Dockerfile",
];

const TEST_DIR_NAMES: &[&str] = &["__tests__", "test", "tests", "e2e", "spec"];

/// Layout and size of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureProfile {
    /// Entry points, first occurrence wins.
    pub entry_points: Vec<String>,
    /// Known config files present at the root.
    pub config_files: Vec<String>,
    /// Test directories, sorted.
    pub test_dirs: Vec<String>,
    /// Number of files in the repository listing.
    pub total_files: usize,
    /// Sum of per-file line counts.
    pub total_lines: u64,
}

/// Analyzes the layout of the repository at `root`.
pub fn analyze_structure(
    ctx: &ServiceContext,
    root: &Path,
    config: &ContextConfig,
) -> StructureProfile {
    let files = files::list_repo_files(ctx, root);
    let all_files = files::list_all(ctx, root);
    let manifest = PackageManifest::load(ctx, root);

    let existing: Vec<&str> = CONVENTIONAL_ENTRY_POINTS
        .iter()
        .copied()
        .filter(|p| ctx.fs.exists(&root.join(p)))
        .collect();

    let config_files = CONFIG_CANDIDATES
        .iter()
        .filter(|c| ctx.fs.exists(&root.join(c)))
        .map(|c| (*c).to_string())
        .collect();

    let total_lines = files
        .iter()
        .map(|f| count_lines(ctx, &root.join(f), config.max_line_count_bytes))
        .sum();

    let profile = StructureProfile {
        entry_points: collect_entry_points(manifest.as_ref(), &existing),
        config_files,
        test_dirs: collect_test_dirs(&all_files),
        total_files: files.len(),
        total_lines,
    };
    debug!(
        entry_points = profile.entry_points.len(),
        test_dirs = profile.test_dirs.len(),
        total_files = profile.total_files,
        total_lines = profile.total_lines,
        "structure analyzed"
    );
    profile
}

/// Merges manifest entry points with the conventional paths that exist.
///
/// Order is `main`, then `exports`, then `existing`; duplicates keep their
/// first position.
#[must_use]
pub fn collect_entry_points(manifest: Option<&PackageManifest>, existing: &[&str]) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(manifest) = manifest {
        candidates.extend(manifest.main.iter().filter(|main| !main.is_empty()).cloned());
        if let Some(exports) = &manifest.exports {
            export_targets(exports, &mut candidates);
        }
    }
    candidates.extend(existing.iter().map(|p| (*p).to_string()));

    let mut entry_points: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !entry_points.contains(&candidate) {
            entry_points.push(candidate);
        }
    }
    entry_points
}

/// String targets of an `exports` field, descending at most two levels.
///
/// Objects and arrays are both walked by their values, so fallback arrays
/// such as `{".": ["./a.js", "./b.js"]}` contribute every string.
fn export_targets(exports: &Value, out: &mut Vec<String>) {
    if let Value::String(target) = exports {
        out.push(target.clone());
    }
    for value in members(exports) {
        match value {
            Value::String(target) => out.push(target.clone()),
            nested => out.extend(members(nested).filter_map(Value::as_str).map(String::from)),
        }
    }
}

fn members(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Directory prefixes ending in a conventional test directory name.
///
/// Only directory segments are considered; the result is sorted and unique.
#[must_use]
pub fn collect_test_dirs<S: AsRef<str>>(files: &[S]) -> Vec<String> {
    let mut dirs = BTreeSet::new();
    for file in files {
        let segments: Vec<&str> = file.as_ref().split('/').collect();
        let Some((_, parents)) = segments.split_last() else {
            continue;
        };
        for (i, segment) in parents.iter().enumerate() {
            if TEST_DIR_NAMES.contains(segment) {
                dirs.insert(segments[..=i].join("/"));
            }
        }
    }
    dirs.into_iter().collect()
}

/// Counts the lines of one file, or 0 if it is empty, too large or unreadable.
pub fn count_lines(ctx: &ServiceContext, path: &Path, max_bytes: u64) -> u64 {
    match ctx.fs.file_size(path) {
        Ok(size) if size > max_bytes => return 0,
        Ok(_) => {}
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping line count");
            return 0;
        }
    }
    match ctx.fs.read_to_string(path) {
        Ok(text) => line_count(&text),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping line count");
            0
        }
    }
}

/// Number of newline-separated segments; a trailing newline adds an empty one.
#[must_use]
pub fn line_count(text: &str) -> u64 {
    if text.is_empty() {
        return 0;
    }
    text.bytes().filter(|b| *b == b'\n').count() as u64 + 1
}
