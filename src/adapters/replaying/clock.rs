//! Replayed clock.

use chrono::{DateTime, Utc};

use super::Tape;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Serves recorded timestamps in order.
pub struct ReplayingClock {
    tape: Tape,
}

impl ReplayingClock {
    /// Wraps a replayer holding `clock` interactions.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { tape: Tape::new("clock", replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        self.tape.value("now")
    }
}
