//! Time source.

use chrono::{DateTime, Utc};

/// Wall clock used for the snapshot's `generated` field, kept behind a port
/// so a replayed run reproduces the recorded timestamp.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
