//! Live filesystem adapter using `std::fs` and the `ignore` walker.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Name of the version-control metadata directory skipped by the walk.
const VCS_DIR: &str = ".git";

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_size(&self, path: &Path) -> Result<u64, PortError> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(format!("{} is not a regular file", path.display()).into());
        }
        Ok(metadata.len())
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<String>, PortError> {
        if !root.is_dir() {
            return Err(format!("{} is not a directory", root.display()).into());
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| entry.file_name() != VCS_DIR)
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let parts: Vec<String> = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(parts.join("/"));
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_lists_nested_files_with_forward_slashes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        std::fs::write(dir.path().join("README.md"), "hi").unwrap();
        std::fs::write(dir.path().join("src/nested/lib.rs"), "").unwrap();

        let files = LiveFileSystem.walk_files(dir.path()).unwrap();
        assert_eq!(files, vec!["README.md", "src/nested/lib.rs"]);
    }

    #[test]
    fn walk_skips_git_dir_but_keeps_hidden_and_ignored_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        std::fs::write(dir.path().join(".gitignore"), "build.log\n").unwrap();
        std::fs::write(dir.path().join("build.log"), "").unwrap();

        let files = LiveFileSystem.walk_files(dir.path()).unwrap();
        assert_eq!(files, vec![".gitignore", "build.log"]);
    }

    #[test]
    fn walk_of_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.walk_files(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn file_size_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "12345").unwrap();
        assert_eq!(LiveFileSystem.file_size(&path).unwrap(), 5);
        assert!(LiveFileSystem.file_size(dir.path()).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/REPO.md");
        LiveFileSystem.write(&path, "# Repo").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "# Repo");
    }
}
