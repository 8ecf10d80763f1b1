//! Recorded clock.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::Track;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Writes every timestamp the inner clock hands out.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    track: Track,
}

impl RecordingClock {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, track: Track::new("clock", recorder) }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now();
        self.track.value("now", Value::Null, &now);
        now
    }
}
