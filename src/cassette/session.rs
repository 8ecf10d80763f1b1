//! A directory of per-port cassettes recorded during one run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, warn};

use super::config::cassette_file_name;
use super::recorder::CassetteRecorder;
use super::CassetteError;

/// Shared recorder handed to a recording adapter.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// One recorder per port, all writing under `<base>/<timestamp>/`.
///
/// [`CassetteConfig::from_dir`](super::config::CassetteConfig::from_dir)
/// reads the finished directory back.
pub struct RecordingSession {
    /// `fs` recorder.
    pub fs: SharedRecorder,
    /// `git` recorder.
    pub git: SharedRecorder,
    /// `clock` recorder.
    pub clock: SharedRecorder,
    /// `issues` recorder.
    pub issues: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Opens a fresh timestamped directory under `base`. Every cassette is
    /// stamped with the HEAD commit of `repo`.
    ///
    /// # Errors
    ///
    /// Fails if the directory already exists or cannot be created.
    pub fn new(base: &Path, repo: &Path) -> Result<Self, CassetteError> {
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&stamp);
        if output_dir.exists() {
            return Err(CassetteError::DirectoryExists(output_dir));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|source| CassetteError::Write { path: output_dir.clone(), source })?;

        let commit = head_commit(repo);
        let open = |port: &str| -> SharedRecorder {
            let recorder = CassetteRecorder::new(
                output_dir.join(cassette_file_name(port)),
                format!("{stamp}-{port}"),
                commit.as_str(),
            );
            Arc::new(Mutex::new(recorder))
        };
        debug!(dir = %output_dir.display(), commit = %commit, "recording session opened");

        Ok(Self { fs: open("fs"), git: open("git"), clock: open("clock"), issues: open("issues"), output_dir })
    }

    /// Where the cassettes go.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes all four cassettes and returns their directory. Every
    /// context built with
    /// [`ServiceContext::recording`](crate::context::ServiceContext::recording)
    /// must be dropped first.
    ///
    /// # Errors
    ///
    /// Fails if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        for (port, shared) in
            [("fs", self.fs), ("git", self.git), ("clock", self.clock), ("issues", self.issues)]
        {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| CassetteError::StillShared(port))?
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner);
            let path = recorder.path().to_path_buf();
            recorder.finish().map_err(|source| CassetteError::Write { path, source })?;
        }
        Ok(self.output_dir)
    }
}

fn head_commit(repo: &Path) -> String {
    let output = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo)
        .output();
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => {
            warn!(repo = %repo.display(), "no HEAD commit; cassettes stamped 'unknown'");
            "unknown".to_string()
        }
    }
}
