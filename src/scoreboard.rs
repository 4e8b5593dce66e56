//! Top-3 best-time leaderboard.
//!
//! At most one entry per player name (their lowest time), sorted ascending
//! and truncated to three entries on every write. The whole board is
//! persisted as one JSON array and replaced in full, never partially merged.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const LEADERBOARD_KEY: &str = "leaderboard";
pub const LEADERBOARD_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub time: f64,
}

pub struct ScoreBoard {
    store: Rc<dyn KeyValueStore>,
}

impl ScoreBoard {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Folds one finish time into the board: keeps the lower time per name,
    /// re-sorts ascending and truncates to the top three. The sort is
    /// stable, so equal times keep insertion order and an earlier finish
    /// ranks ahead of a later one with the same time.
    pub fn record(&self, player: &str, time: f64) {
        let mut board = self.top();
        match board.iter_mut().find(|e| e.name == player) {
            Some(entry) => {
                if time < entry.time {
                    entry.time = time;
                }
            }
            None => board.push(ScoreEntry {
                name: player.to_string(),
                time,
            }),
        }
        board.sort_by(|a, b| a.time.total_cmp(&b.time));
        board.truncate(LEADERBOARD_SIZE);
        self.save(&board);
    }

    /// The persisted standings, already sorted and bounded. Absent or
    /// unparseable data reads as an empty board.
    pub fn top(&self) -> Vec<ScoreEntry> {
        self.store
            .get(LEADERBOARD_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Deletes the persisted board. Irreversible; the confirmation gate
    /// lives at the UI boundary.
    pub fn reset(&self) {
        self.store.remove(LEADERBOARD_KEY);
    }

    fn save(&self, board: &[ScoreEntry]) {
        if let Ok(raw) = serde_json::to_string(board) {
            self.store.set(LEADERBOARD_KEY, &raw);
        }
    }
}
