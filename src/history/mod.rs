//! Version-control history mining.
//!
//! Each function asks the git (or issue tracker) port for raw output and
//! turns it into a typed summary. A failing query is logged and treated as
//! empty output, so every function here always returns a value.

pub mod conventions;
pub mod hot_paths;
pub mod recent;

pub use conventions::{get_conventions, summarize_conventions, CommitPattern, ConventionProfile};
pub use hot_paths::{get_hot_paths, parse_hot_paths, HotPath};
pub use recent::{get_recent_changes, RecentChanges};

use tracing::debug;

use crate::ports::PortError;

/// Unwraps a port result, logging and substituting empty output on error.
pub(crate) fn or_empty(result: Result<String, PortError>, operation: &str) -> String {
    result.unwrap_or_else(|err| {
        debug!(operation, error = %err, "git query failed, treating output as empty");
        String::new()
    })
}
