//! Save format module - the persisted session blob
//!
//! The save is a small JSON document holding the board kinds and session
//! progress. Field names and defaults match the original web build, so a
//! save written by either implementation reads back the same way. Special
//! tags are not persisted; they do not survive a reload.

use serde::{Deserialize, Serialize};

use tui_candymon_types::{GRID_SIZE, MOVE_LIMIT, START_GOAL};

/// Persisted session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    /// Board kinds, row-major, `-1` for empty
    pub grid_kinds: [[i8; GRID_SIZE as usize]; GRID_SIZE as usize],
    #[serde(default)]
    pub score: u32,
    #[serde(default = "default_moves")]
    pub moves_left: i32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_goal")]
    pub goal: u32,
}

fn default_moves() -> i32 {
    MOVE_LIMIT
}

fn default_level() -> u32 {
    1
}

fn default_goal() -> u32 {
    START_GOAL
}

impl SaveState {
    /// Serialize to the JSON blob stored under the save key
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a save blob, rejecting malformed documents
    ///
    /// A save with no moves left comes back with a fresh move allowance, so
    /// a stored game-over state cannot soft-lock a resumed session.
    pub fn decode(raw: &str) -> Option<Self> {
        let mut save: SaveState = serde_json::from_str(raw).ok()?;
        if save.moves_left <= 0 {
            save.moves_left = MOVE_LIMIT;
        }
        Some(save)
    }
}
