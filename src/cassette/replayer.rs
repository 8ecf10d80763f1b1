//! Replays recorded interactions from a cassette.

use std::collections::{BTreeMap, VecDeque};

use thiserror::Error;

use super::format::{Cassette, Interaction};

/// A replay request the cassette cannot satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Nothing was ever recorded for this port and method.
    #[error(
        "cassette has no interactions for {port}::{method}; recorded pairs: [{}]",
        recorded.join(", ")
    )]
    NotRecorded {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Every `port::method` pair the cassette does contain.
        recorded: Vec<String>,
    },

    /// Every recorded interaction for this port and method was consumed.
    #[error("cassette exhausted: all {count} {port}::{method} interactions consumed")]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Number of interactions that were recorded.
        count: usize,
    },
}

/// Serves a cassette's interactions in recorded order, with one
/// independent queue per port/method pair.
pub struct CassetteReplayer {
    queues: BTreeMap<(String, String), VecDeque<Interaction>>,
    served: BTreeMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: BTreeMap<(String, String), VecDeque<Interaction>> = BTreeMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, served: BTreeMap::new() }
    }

    /// Takes the next interaction recorded for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the pair was never recorded or its queue
    /// is empty.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, ReplayError> {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            return Err(ReplayError::NotRecorded {
                port: key.0,
                method: key.1,
                recorded: self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect(),
            });
        };
        match queue.pop_front() {
            Some(interaction) => {
                *self.served.entry(key).or_default() += 1;
                Ok(interaction)
            }
            None => {
                let count = self.served.get(&key).copied().unwrap_or_default();
                Err(ReplayError::Exhausted { port: key.0, method: key.1, count })
            }
        }
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
