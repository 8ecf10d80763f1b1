//! Port wiring for live, recording and replaying runs.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::live::issues::LiveIssueTracker;
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingGitRepo, RecordingIssueTracker,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingGitRepo, ReplayingIssueTracker,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::cassette::CassetteError;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;
use crate::ports::issues::IssueTracker;

/// The four ports the extraction pipeline talks to.
///
/// Fields are public so a test can swap a single port.
pub struct ServiceContext {
    /// Source of the `generated` timestamp.
    pub clock: Box<dyn Clock>,
    /// Repository file reads and the directory walk.
    pub fs: Box<dyn FileSystem>,
    /// `git` queries.
    pub git: Box<dyn GitRepo>,
    /// Open pull request and issue counts.
    pub issues: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// System clock, real disk, `git` and `gh`.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            issues: Box::new(LiveIssueTracker),
        }
    }

    /// Live ports whose calls are written to `session`. Drop the context
    /// before [`RecordingSession::finish`].
    #[must_use]
    pub fn recording(session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            git: Box::new(RecordingGitRepo::new(Box::new(LiveGitRepo), Arc::clone(&session.git))),
            issues: Box::new(RecordingIssueTracker::new(
                Box::new(LiveIssueTracker),
                Arc::clone(&session.issues),
            )),
        }
    }

    /// Replays every port from one cassette. Each port reads its own
    /// interactions from the file independently of the others.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette))),
            issues: Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Replays the ports that have a cassette in `config` and leaves the
    /// rest live, so a test can replay `git` over a real temporary tree.
    ///
    /// # Errors
    ///
    /// Returns the first cassette that cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, CassetteError> {
        let replayers = config.load_all()?;
        let mut ctx = Self::live();
        if let Some(r) = replayers.clock {
            ctx.clock = Box::new(ReplayingClock::new(r));
        }
        if let Some(r) = replayers.fs {
            ctx.fs = Box::new(ReplayingFileSystem::new(r));
        }
        if let Some(r) = replayers.git {
            ctx.git = Box::new(ReplayingGitRepo::new(r));
        }
        if let Some(r) = replayers.issues {
            ctx.issues = Box::new(ReplayingIssueTracker::new(r));
        }
        Ok(ctx)
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
    fn replaying_context_from_monolithic_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "issues".into(),
                    method: "open_issue_count".into(),
                    input: json!({"root": "/repo"}),
                    output: json!({"Ok": 4}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(ctx.issues.open_issue_count(Path::new("/repo")).unwrap(), 4);
    }

    #[test]
    fn unconfigured_ports_fall_back_to_live_adapters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();

        let ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        assert!(ctx.fs.exists(&dir.path().join("yarn.lock")));
    }

    #[test]
    fn missing_cassette_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceContext::replaying(&dir.path().join("nope.yaml")).err().unwrap();
        assert!(matches!(err, CassetteError::Read { .. }));
    }
}
