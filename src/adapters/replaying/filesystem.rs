//! Replayed filesystem.

use std::path::Path;

use super::Tape;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Answers filesystem calls from a cassette.
///
/// Paths are ignored: each method serves its recordings in order, so the
/// replay must probe files in the same sequence the recording did.
pub struct ReplayingFileSystem {
    tape: Tape,
}

impl ReplayingFileSystem {
    /// Wraps a replayer holding `fs` interactions.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { tape: Tape::new("fs", replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        self.tape.result("read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        self.tape.result("write")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.tape.value("exists")
    }

    fn file_size(&self, _path: &Path) -> Result<u64, PortError> {
        self.tape.result("file_size")
    }

    fn walk_files(&self, _root: &Path) -> Result<Vec<String>, PortError> {
        self.tape.result("walk_files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::testing::replayer;
    use serde_json::json;

    #[test]
    fn manifest_read_is_served() {
        let fs = ReplayingFileSystem::new(replayer(
            "fs",
            &[("read_to_string", json!({"Ok": "{\"name\": \"demo\"}"}))],
        ));
        let text = fs.read_to_string(Path::new("/repo/package.json")).unwrap();
        assert!(text.contains("demo"));
    }

    #[test]
    fn recorded_read_failure_is_an_error() {
        let fs = ReplayingFileSystem::new(replayer(
            "fs",
            &[("read_to_string", json!({"Err": "file not found"}))],
        ));
        let err = fs.read_to_string(Path::new("/missing")).unwrap_err();
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn probes_walks_and_writes() {
        let fs = ReplayingFileSystem::new(replayer(
            "fs",
            &[
                ("exists", json!(true)),
                ("walk_files", json!({"Ok": ["a.ts", "tests/b.ts"]})),
                ("file_size", json!({"Ok": 12})),
                ("write", json!({"Ok": null})),
            ],
        ));
        assert!(fs.exists(Path::new("/repo/yarn.lock")));
        assert_eq!(fs.walk_files(Path::new("/repo")).unwrap().len(), 2);
        assert_eq!(fs.file_size(Path::new("/repo/a.ts")).unwrap(), 12);
        assert!(fs.write(Path::new("/repo/REPO.md"), "# repo").is_ok());
    }
}
