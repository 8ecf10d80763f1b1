//! `package.json` manifest reading.
//!
//! Only the handful of fields the analyzers need are extracted, leniently:
//! a field of the wrong JSON type is treated as absent rather than making
//! the whole manifest unusable. A manifest that is missing, unreadable or
//! not a JSON object is reported as `None`.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::context::ServiceContext;

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the pipeline looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    /// Runtime dependency names.
    pub dependencies: Vec<String>,
    /// Development dependency names.
    pub dev_dependencies: Vec<String>,
    /// The `main` field when it is a string.
    pub main: Option<String>,
    /// The raw `exports` field.
    pub exports: Option<Value>,
    /// The `engines.node` constraint when it is a string.
    pub node_engine: Option<String>,
}

impl PackageManifest {
    /// Parses manifest text. Returns `None` unless it is a JSON object.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let Ok(Value::Object(root)) = serde_json::from_str::<Value>(text) else {
            return None;
        };

        Some(Self {
            dependencies: object_keys(root.get("dependencies")),
            dev_dependencies: object_keys(root.get("devDependencies")),
            main: root.get("main").and_then(Value::as_str).map(String::from),
            exports: root.get("exports").cloned(),
            node_engine: root
                .get("engines")
                .and_then(Value::as_object)
                .and_then(|engines| engines.get("node"))
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(String::from),
        })
    }

    /// Reads and parses `package.json` under `root`.
    pub fn load(ctx: &ServiceContext, root: &Path) -> Option<Self> {
        let path = root.join(MANIFEST_FILE);
        if !ctx.fs.exists(&path) {
            return None;
        }
        let text = match ctx.fs.read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "manifest unreadable");
                return None;
            }
        };
        let manifest = Self::parse(&text);
        if manifest.is_none() {
            debug!(path = %path.display(), "manifest is not a JSON object, ignoring it");
        }
        manifest
    }

    /// Returns `true` if `name` is a runtime or development dependency.
    #[must_use]
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.iter().chain(&self.dev_dependencies).any(|dep| dep == name)
    }
}

fn object_keys(value: Option<&Value>) -> Vec<String> {
    value.and_then(Value::as_object).map(Map::keys).into_iter().flatten().cloned().collect()
}
