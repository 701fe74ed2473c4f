//! Game events emitted by the session
//!
//! Events queue up inside the session while commands run and are drained by
//! the host with [`take_events`](crate::session::Session::take_events). The
//! terminal frontend turns them into redraws and sound cues; the AI adapter
//! flushes an observation when any arrive.

use crate::missions::Mission;

/// Something observable happened to the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    MovesChanged(i32),
    MeterChanged(u8),
    FeverStarted,
    FeverEnded,
    /// One cascade cycle cleared cells
    MatchCleared {
        cleared: u32,
        combo: u32,
        lines_fired: u32,
        bombs_fired: u32,
        dropped: u32,
    },
    /// The score goal was reached
    LevelUp { level: u32, goal: u32 },
    MissionsChanged([Mission; 3]),
    /// Two missions done: bonus moves granted
    MissionBonus { moves: i32 },
    StreakChanged(u32),
    /// The board had no moves left and was reshuffled
    Reshuffled,
    GameOver { score: u32, best: u32 },
}
