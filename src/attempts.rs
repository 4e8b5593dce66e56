//! Per-player attempt counting.
//!
//! One completed (submitted) typing session costs the player one try;
//! abandoned sessions cost nothing. Counts are keyed by the exact trimmed
//! player name and never expire.

use std::collections::HashMap;
use std::rc::Rc;

use crate::storage::KeyValueStore;

pub const TRIES_KEY: &str = "tries";

/// Passive counter of completed sessions per player, stored as a single JSON
/// object under [`TRIES_KEY`]. The attempt cap itself is enforced by the
/// session state machine; this type only reads and writes counts.
pub struct AttemptLog {
    store: Rc<dyn KeyValueStore>,
}

impl AttemptLog {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> HashMap<String, u32> {
        // Unparseable data counts as no data; the next save overwrites it.
        self.store
            .get(TRIES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Stored count for `player`, or 0 if the player has never finished.
    pub fn tries(&self, player: &str) -> u32 {
        self.load().get(player).copied().unwrap_or(0)
    }

    /// Writes `count` for `player`, leaving all other players untouched, and
    /// persists the whole mapping immediately.
    pub fn set_tries(&self, player: &str, count: u32) {
        let mut counts = self.load();
        counts.insert(player.to_string(), count);
        if let Ok(raw) = serde_json::to_string(&counts) {
            self.store.set(TRIES_KEY, &raw);
        }
    }

    pub fn has_attempts_remaining(&self, player: &str, max_tries: u32) -> bool {
        self.tries(player) < max_tries
    }
}
