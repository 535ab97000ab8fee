//! Serves recorded filesystem calls back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Per-method queues of recorded filesystem calls.
///
/// Calls to different methods may interleave freely; within one method they
/// are served in recording order.
pub struct CassetteReplayer {
    calls: HashMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queues every filesystem call in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut calls: HashMap<String, VecDeque<Interaction>> = HashMap::new();
        for interaction in cassette.fs_calls() {
            calls.entry(interaction.method.clone()).or_default().push_back(interaction.clone());
        }
        Self { calls }
    }

    /// Takes the next recorded call to `method`.
    ///
    /// # Panics
    ///
    /// Panics if no call to `method` is left, listing the methods that
    /// still have calls queued.
    pub fn next_call(&mut self, method: &str) -> Interaction {
        if let Some(interaction) = self.calls.get_mut(method).and_then(VecDeque::pop_front) {
            return interaction;
        }
        let mut remaining: Vec<&str> = self
            .calls
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        remaining.sort_unstable();
        panic!(
            "Cassette exhausted: no recorded fs::{method} call left. \
             Methods with calls remaining: [{}]",
            remaining.join(", ")
        );
    }
}
