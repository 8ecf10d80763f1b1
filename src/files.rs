//! Repository file enumeration.
//!
//! Two listings feed every analyzer: the *tracked* listing (what git sees,
//! honoring ignore rules and including untracked-but-not-ignored files) and
//! the *exhaustive* listing (a plain walk that only skips `.git`). Outside a
//! git work tree the tracked listing is empty and callers fall back to the
//! exhaustive one.

use std::path::Path;

use tracing::debug;

use crate::context::ServiceContext;

/// Lists files visible to git. Any git failure yields an empty listing.
pub fn list_tracked(ctx: &ServiceContext, root: &Path) -> Vec<String> {
    match ctx.git.list_files(root) {
        Ok(files) => files
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect(),
        Err(err) => {
            debug!(root = %root.display(), error = %err, "git file listing unavailable");
            Vec::new()
        }
    }
}

/// Lists every regular file under `root` except the `.git` directory.
///
/// An unwalkable root yields an empty listing.
pub fn list_all(ctx: &ServiceContext, root: &Path) -> Vec<String> {
    ctx.fs.walk_files(root).unwrap_or_else(|err| {
        debug!(root = %root.display(), error = %err, "filesystem walk failed");
        Vec::new()
    })
}

/// Tracked listing when non-empty, otherwise the exhaustive listing.
pub fn list_repo_files(ctx: &ServiceContext, root: &Path) -> Vec<String> {
    let tracked = list_tracked(ctx, root);
    if tracked.is_empty() {
        debug!(root = %root.display(), "no git-visible files, walking the filesystem");
        return list_all(ctx, root);
    }
    tracked
}
