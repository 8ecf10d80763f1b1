//! Filesystem port for reading repository contents.

use std::path::Path;

use super::PortError;

/// Provides filesystem access to the repository under inspection.
///
/// The pipeline itself only reads; `write` exists for the CLI, which
/// stores rendered reports next to the repository.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Creates or replaces a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns the size of a regular file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be stat'ed or is not a regular file.
    fn file_size(&self, path: &Path) -> Result<u64, PortError>;

    /// Recursively lists every regular file under `root`.
    ///
    /// Paths are root-relative and `/`-separated. The `.git` directory is
    /// never descended into, ignore files are not honored, and unreadable
    /// subtrees are skipped rather than failing the walk.
    ///
    /// # Errors
    ///
    /// Returns an error only if `root` itself cannot be walked.
    fn walk_files(&self, root: &Path) -> Result<Vec<String>, PortError>;
}
