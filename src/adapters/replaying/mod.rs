//! Adapters that answer port calls from a cassette instead of the world.
//!
//! Asking for an interaction the cassette does not hold panics with the
//! [`ReplayError`](crate::cassette::replayer::ReplayError) message.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod issues;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use issues::ReplayingIssueTracker;

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// One port's view of a cassette.
pub(crate) struct Tape {
    port: &'static str,
    replayer: Mutex<CassetteReplayer>,
}

impl Tape {
    pub(crate) fn new(port: &'static str, replayer: CassetteReplayer) -> Self {
        Self { port, replayer: Mutex::new(replayer) }
    }

    /// Raw output of the next `method` interaction.
    pub(crate) fn output(&self, method: &str) -> Value {
        let mut replayer = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
        match replayer.next_interaction(self.port, method) {
            Ok(interaction) => interaction.output,
            Err(err) => panic!("{err}"),
        }
    }

    /// Next `method` output decoded as a port result.
    pub(crate) fn result<T: DeserializeOwned>(&self, method: &str) -> Result<T, PortError> {
        let context = format!("{}::{method}", self.port);
        decode_result(self.output(method), &context)
    }

    /// Next `method` output for a port call that cannot fail.
    pub(crate) fn value<T: DeserializeOwned>(&self, method: &str) -> T {
        match serde_json::from_value(self.output(method)) {
            Ok(value) => value,
            Err(err) => panic!("{}::{method}: unexpected recorded output: {err}", self.port),
        }
    }
}

/// Decodes a recorded result.
///
/// Recording adapters write `{"Ok": v}` or `{"Err": "message"}`.
/// Hand-written cassettes may also use lowercase keys or a bare value,
/// which counts as success.
fn decode_result<T: DeserializeOwned>(output: Value, context: &str) -> Result<T, PortError> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        return Err(err.as_str().unwrap_or("unknown error").into());
    }
    let value = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(value) => value.clone(),
        None => output,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;

    /// Replayer over `(method, output)` pairs recorded on one port.
    pub(crate) fn replayer(port: &str, outputs: &[(&str, Value)]) -> CassetteReplayer {
        let interactions = outputs
            .iter()
            .enumerate()
            .map(|(seq, (method, output))| Interaction {
                seq: seq as u64,
                port: port.into(),
                method: (*method).into(),
                input: json!({}),
                output: output.clone(),
            })
            .collect();
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions };
        CassetteReplayer::new(&cassette)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::replayer;
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_accepts_both_spellings() {
        let upper: String = decode_result(json!({"Ok": "a"}), "t").unwrap();
        let lower: String = decode_result(json!({"ok": "b"}), "t").unwrap();
        assert_eq!(upper, "a");
        assert_eq!(lower, "b");
    }

    #[test]
    fn decode_surfaces_recorded_error() {
        let result: Result<String, _> = decode_result(json!({"Err": "not a git repository"}), "t");
        assert_eq!(result.unwrap_err().to_string(), "not a git repository");
    }

    #[test]
    fn decode_treats_bare_value_as_success() {
        let files: Vec<String> = decode_result(json!(["a.ts"]), "t").unwrap();
        assert_eq!(files, vec!["a.ts"]);
    }

    #[test]
    fn type_mismatch_names_the_call() {
        let tape = Tape::new("issues", replayer("issues", &[("count", json!({"Ok": "seven"}))]));
        let result: Result<u64, _> = tape.result("count");
        assert!(result.unwrap_err().to_string().starts_with("issues::count: failed to deserialize"));
    }

    #[test]
    #[should_panic(expected = "cassette exhausted")]
    fn running_past_the_recording_panics() {
        let tape = Tape::new("git", replayer("git", &[("list_files", json!({"Ok": []}))]));
        let _ = tape.result::<Vec<String>>("list_files");
        let _ = tape.result::<Vec<String>>("list_files");
    }
}
