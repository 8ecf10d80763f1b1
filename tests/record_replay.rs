//! Record-replay round-trip integration test.
//!
//! Proves that the record/replay system works end-to-end:
//! 1. Build a snapshot through recording adapters, writing per-port cassettes.
//! 2. Delete the repository and replay the cassettes.
//! 3. Assert the replayed snapshot equals the recorded one.
//! 4. Replay a hand-written cassette and assert determinism.

use std::path::Path;

use serde_json::json;

use repo_context::cassette::config::CassetteConfig;
use repo_context::cassette::recorder::CassetteRecorder;
use repo_context::cassette::session::RecordingSession;
use repo_context::config::ContextConfig;
use repo_context::context::ServiceContext;
use repo_context::snapshot::build_repo_context;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn recorded_pipeline_replays_without_the_repository() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("service");
    write(&repo, "package.json", r#"{"dependencies": {"express": "4"}, "engines": {"node": ">=20"}}"#);
    write(&repo, "src/server.js", "app.listen(3000);\n");
    write(&repo, "src/routes/__tests__/health.test.js", "it('ok', () => {});\n");
    write(&repo, "Dockerfile", "FROM node:20\n");

    // --- Phase 1: Record a full pipeline run ---
    let session = RecordingSession::new(&dir.path().join("cassettes"), &repo).unwrap();
    let ctx = ServiceContext::recording(&session);
    let recorded = build_repo_context(&ctx, &repo, &ContextConfig::default());
    drop(ctx);
    let cassette_dir = session.finish().unwrap();

    for port in ["fs", "git", "clock", "issues"] {
        assert!(cassette_dir.join(format!("{port}.cassette.yaml")).is_file(), "{port} cassette");
    }

    // --- Phase 2: Replay with the repository gone ---
    std::fs::remove_dir_all(&repo).unwrap();
    let config = CassetteConfig::from_dir(&cassette_dir);
    let replay_ctx = ServiceContext::replaying_from(&config).unwrap();
    let replayed = build_repo_context(&replay_ctx, &repo, &ContextConfig::default());

    assert_eq!(replayed, recorded);
    assert_eq!(replayed.stack.runtime.as_deref(), Some("Node >=20"));
    assert_eq!(replayed.structure.test_dirs, vec!["src/routes/__tests__"]);
    assert_eq!(replayed.structure.config_files, vec!["Dockerfile"]);
}

#[test]
fn hand_written_cassette_replays_deterministically() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("roundtrip.cassette.yaml");
    let root = Path::new("/work/acme");

    let mut recorder = CassetteRecorder::new(&cassette_path, "roundtrip-test", "abc123");
    recorder.record("clock", "now", json!(null), json!("2025-03-15T14:30:00Z"));
    let listing = json!({"Ok": ["src/index.ts", "src/app.ts", "lib/legacy.js"]});
    recorder.record("git", "list_files", json!({"root": root}), listing.clone());
    recorder.record("git", "list_files", json!({"root": root}), listing);
    recorder.record(
        "git",
        "changed_paths",
        json!({"root": root, "days": 30}),
        json!({"Ok": "src/app.ts\n\nsrc/app.ts\nsrc/index.ts\n"}),
    );
    recorder.record(
        "git",
        "last_commit",
        json!({"root": root}),
        json!({"Ok": "feat: ship it|cafe01|2025-03-14 09:00:00 +0000"}),
    );
    recorder.record("git", "remote_branches", json!({"root": root}), json!({"Ok": "  origin/main\n"}));
    recorder.record(
        "git",
        "commit_subjects",
        json!({"root": root, "limit": 20}),
        json!({"Ok": "feat: ship it\nfix: typo\nwip"}),
    );
    recorder.record("issues", "open_pull_request_count", json!({}), json!({"Ok": 1}));
    recorder.record("issues", "open_issue_count", json!({}), json!({"Ok": 0}));
    // No manifest, lock, version, CI or config file exists; unused
    // interactions are never replayed.
    for _ in 0..40 {
        recorder.record("fs", "exists", json!({}), json!(false));
    }
    recorder.record("fs", "walk_files", json!({}), json!({"Ok": ["src/index.ts", "src/app.ts", "lib/legacy.js"]}));
    for _ in 0..3 {
        recorder.record("fs", "file_size", json!({}), json!({"Ok": 10}));
        recorder.record("fs", "read_to_string", json!({}), json!({"Ok": "a\nb"}));
    }
    recorder.finish().expect("recording should succeed");

    let snapshot = || {
        let ctx = ServiceContext::replaying(&cassette_path).unwrap();
        build_repo_context(&ctx, root, &ContextConfig::default())
    };
    let first = snapshot();
    let second = snapshot();

    assert_eq!(first, second, "determinism: replays differ");
    assert_eq!(first.generated, "2025-03-15T14:30:00.000Z");
    assert_eq!(first.repo, "acme");
    assert_eq!(first.hot_paths[0].file, "src/app.ts");
    assert_eq!(first.hot_paths[0].commits, 2);
    assert_eq!(first.recent_changes.last_commit_sha, "cafe01");
    assert!(first.recent_changes.active_branches.is_empty());
    assert_eq!(first.recent_changes.open_issues, Some(0));
    assert_eq!(first.structure.total_lines, 6);
    assert!((first.conventions.conventional_commit_ratio - 0.67).abs() < f64::EPSILON);
}
