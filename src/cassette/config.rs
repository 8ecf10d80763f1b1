//! Which cassette file serves which port.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use super::CassetteError;

/// File name a recording session gives each port's cassette.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

/// Optional cassette path per port. A port left unset is served by its
/// live adapter.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for `fs`.
    pub fs: Option<PathBuf>,
    /// Cassette for `git`.
    pub git: Option<PathBuf>,
    /// Cassette for `clock`.
    pub clock: Option<PathBuf>,
    /// Cassette for `issues`.
    pub issues: Option<PathBuf>,
}

/// Loaded replayers, one independent stream per configured port.
pub struct PortReplayers {
    /// Replayer for `fs`.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for `git`.
    pub git: Option<CassetteReplayer>,
    /// Replayer for `clock`.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for `issues`.
    pub issues: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Points every port at its file in a directory written by a
    /// [`RecordingSession`](super::session::RecordingSession). Ports whose
    /// file is absent stay unset.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let port = |name: &str| Some(dir.join(cassette_file_name(name))).filter(|p| p.is_file());
        Self { fs: port("fs"), git: port("git"), clock: port("clock"), issues: port("issues") }
    }

    /// Loads one cassette file as a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_monolithic(path: &Path) -> Result<CassetteReplayer, CassetteError> {
        Cassette::load(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns the first read or parse failure.
    pub fn load_all(&self) -> Result<PortReplayers, CassetteError> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(Self::load_monolithic).transpose();
        Ok(PortReplayers {
            fs: load(&self.fs)?,
            git: load(&self.git)?,
            clock: load(&self.clock)?,
            issues: load(&self.issues)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn from_dir_picks_up_only_present_ports() {
        let dir = tempfile::tempdir().unwrap();
        write_cassette(&dir.path().join(cassette_file_name("git")), vec![]);
        write_cassette(&dir.path().join(cassette_file_name("clock")), vec![]);

        let config = CassetteConfig::from_dir(dir.path());
        assert!(config.git.is_some());
        assert!(config.clock.is_some());
        assert!(config.fs.is_none());
        assert!(config.issues.is_none());
    }

    #[test]
    fn load_all_builds_configured_replayers() {
        let dir = tempfile::tempdir().unwrap();
        let git_path = dir.path().join("git.cassette.yaml");
        write_cassette(
            &git_path,
            vec![Interaction {
                seq: 0,
                port: "git".into(),
                method: "remote_branches".into(),
                input: json!({"root": "/repo"}),
                output: json!({"Ok": "  origin/main\n  origin/feature-x\n"}),
            }],
        );

        let config = CassetteConfig { git: Some(git_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let git = replayers.git.as_mut().unwrap();
        let interaction = git.next_interaction("git", "remote_branches").unwrap();
        assert_eq!(interaction.output, json!({"Ok": "  origin/main\n  origin/feature-x\n"}));
        assert!(replayers.fs.is_none());
    }

    #[test]
    fn load_all_reports_unparsable_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fs.cassette.yaml");
        std::fs::write(&path, "interactions: [").unwrap();

        let config = CassetteConfig { fs: Some(path), ..CassetteConfig::default() };
        let err = config.load_all().err().unwrap();
        assert!(matches!(err, CassetteError::Parse { .. }));
    }
}
