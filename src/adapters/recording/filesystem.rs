//! Recorded filesystem.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::Track;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FileSystem, PortError};

/// Writes every filesystem call and its outcome, keyed by path.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    track: Track,
}

impl RecordingFileSystem {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, track: Track::new("fs", recorder) }
    }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        self.track.result("read_to_string", json!({ "path": path.display().to_string() }), &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        self.track.result("write", json!({ "path": path.display().to_string(), "bytes": contents.len() }), &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let found = self.inner.exists(path);
        self.track.value("exists", json!({ "path": path.display().to_string() }), &found);
        found
    }

    fn file_size(&self, path: &Path) -> Result<u64, PortError> {
        let result = self.inner.file_size(path);
        self.track.result("file_size", json!({ "path": path.display().to_string() }), &result);
        result
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<String>, PortError> {
        let result = self.inner.walk_files(root);
        self.track.result("walk_files", json!({ "root": root.display().to_string() }), &result);
        result
    }
}
