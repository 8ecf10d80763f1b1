//! Adapters that pass calls through to a live port and write each call to
//! a cassette.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod issues;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use git::RecordingGitRepo;
pub use issues::RecordingIssueTracker;

use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

/// One port's handle on a shared recorder.
pub(crate) struct Track {
    port: &'static str,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl Track {
    pub(crate) fn new(port: &'static str, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { port, recorder }
    }

    /// Records a call whose output is a plain value.
    pub(crate) fn value<O: Serialize>(&self, method: &str, input: Value, output: &O) {
        self.push(method, input, to_json(output));
    }

    /// Records a fallible call as `{"Ok": v}` or `{"Err": message}`.
    pub(crate) fn result<T: Serialize, E: Display>(
        &self,
        method: &str,
        input: Value,
        result: &Result<T, E>,
    ) {
        let output = match result {
            Ok(value) => json!({ "Ok": to_json(value) }),
            Err(err) => json!({ "Err": err.to_string() }),
        };
        self.push(method, input, output);
    }

    fn push(&self, method: &str, input: Value, output: Value) {
        let mut recorder = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        recorder.record(self.port, method, input, output);
    }
}

// Port outputs are strings, numbers, lists and timestamps, which always
// serialize.
fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}
