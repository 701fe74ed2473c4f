//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, UI rendering, AI protocol).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Size**: 8x8 cells (rows and columns indexed 0-7)
//! - **Palette**: 8 piece kinds (indices 0-7); the number actually drawn
//!   ramps with level, from 5 kinds at level 1 up to all 8
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_LIMIT` | 30 | Moves per fresh session |
//! | `START_GOAL` | 500 | Score goal at level 1 |
//! | `GOAL_GROWTH_NUM/DEN` | 17/10 | Goal rescale factor on level-up (x1.7, floored) |
//! | `LEVEL_UP_BONUS_MOVES` | 10 | Moves granted on level-up |
//! | `MISSION_BONUS_MOVES` | 3 | Moves granted once when 2 missions complete |
//! | `CELL_SCORE` | 10 | Base score per cleared cell |
//!
//! # Combo Meter / Fever
//!
//! The combo meter is a 0-100 scalar. Clearing cells charges it; a full meter
//! starts fever (2x score) for a fixed real-time duration, after which the
//! meter falls back to a mid value rather than zero.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `METER_MAX` | 100 | Meter ceiling / fever trigger |
//! | `METER_FEVER_RESET` | 35 | Meter value after fever ends |
//! | `METER_GAIN_CAP` | 40 | Max meter gained per cascade cycle |
//! | `METER_DECAY_STEP` | 3 | Meter lost per decay interval when idle |
//! | `METER_DECAY_INTERVAL_MS` | 350 | Idle decay interval |
//! | `FEVER_DURATION_MS` | 8000 | Fever duration (wall clock) |
//! | `FEVER_MULTIPLIER` | 2 | Score multiplier while fever is active |
//!
//! # Examples
//!
//! ```
//! use tui_candymon_types::{CellPos, Special, GRID_SIZE, KIND_COUNT};
//!
//! // Parse a special tag from its wire form (case-insensitive)
//! let special = Special::from_str("line_h").unwrap();
//! assert_eq!(special, Special::LineH);
//! assert_eq!(special.as_str(), "line_h");
//!
//! // Cell positions know about adjacency
//! let a = CellPos::new(3, 4);
//! let b = CellPos::new(3, 5);
//! assert!(a.is_adjacent(b));
//! assert!(a.in_bounds());
//!
//! assert_eq!(GRID_SIZE, 8);
//! assert_eq!(KIND_COUNT, 8);
//! ```

/// Board size in cells per side (8x8 grid)
pub const GRID_SIZE: u8 = 8;

/// Total cell count (64)
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of piece kinds in the full palette (kind values 0-7)
pub const KIND_COUNT: u8 = 8;

/// Minimum run length that counts as a match
pub const MATCH_RUN: usize = 3;

/// Run length at which a run produces line specials
pub const LINE_RUN: usize = 4;

/// Moves granted to a fresh session
pub const MOVE_LIMIT: i32 = 30;

/// Score goal at level 1
pub const START_GOAL: u32 = 500;

/// Goal rescale numerator on level-up (x1.7, floored)
pub const GOAL_GROWTH_NUM: u64 = 17;

/// Goal rescale denominator on level-up
pub const GOAL_GROWTH_DEN: u64 = 10;

/// Bonus moves granted on level-up
pub const LEVEL_UP_BONUS_MOVES: i32 = 10;

/// Bonus moves granted once per session when two missions complete
pub const MISSION_BONUS_MOVES: i32 = 3;

/// Base score per cleared cell (multiplied by combo index and fever)
pub const CELL_SCORE: u32 = 10;

/// Combo meter ceiling; reaching it starts fever
pub const METER_MAX: u8 = 100;

/// Meter value after fever ends
pub const METER_FEVER_RESET: u8 = 35;

/// Cap on meter gained in a single cascade cycle
pub const METER_GAIN_CAP: u32 = 40;

/// Meter gained per cell cleared in a cycle
pub const METER_GAIN_PER_CELL: u32 = 6;

/// Extra meter gained per combo step beyond the first
pub const METER_GAIN_PER_COMBO: u32 = 4;

/// Meter lost per decay interval while idle (fever suspends decay)
pub const METER_DECAY_STEP: u8 = 3;

/// Idle meter decay interval in milliseconds
pub const METER_DECAY_INTERVAL_MS: u32 = 350;

/// Fever duration in milliseconds (wall clock, ticked by the host loop)
pub const FEVER_DURATION_MS: u32 = 8000;

/// Score multiplier while fever is active
pub const FEVER_MULTIPLIER: u32 = 2;

/// Fixed timestep interval for the terminal loop in milliseconds (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Idle time before the terminal loop surfaces a hint, in milliseconds
pub const HINT_IDLE_MS: u32 = 4000;

/// Reshuffle attempts before falling back to a constructive rebuild
pub const RESHUFFLE_RETRY_LIMIT: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_constant_parity() {
        // Source-of-truth: the original Candy Mon tuning values.
        assert_eq!(GRID_SIZE, 8);
        assert_eq!(MOVE_LIMIT, 30);
        assert_eq!(START_GOAL, 500);
        assert_eq!(LEVEL_UP_BONUS_MOVES, 10);
        assert_eq!(MISSION_BONUS_MOVES, 3);
        assert_eq!(CELL_SCORE, 10);

        assert_eq!(METER_MAX, 100);
        assert_eq!(METER_FEVER_RESET, 35);
        assert_eq!(METER_GAIN_CAP, 40);
        assert_eq!(METER_DECAY_STEP, 3);
        assert_eq!(METER_DECAY_INTERVAL_MS, 350);
        assert_eq!(FEVER_DURATION_MS, 8000);
    }

    #[test]
    fn goal_growth_matches_float_factor() {
        // The integer rescale must agree with floor(goal * 1.7) along the
        // whole goal chain a session can actually reach.
        let mut goal = START_GOAL;
        for _ in 0..20 {
            let next = (goal as u64 * GOAL_GROWTH_NUM / GOAL_GROWTH_DEN) as u32;
            assert_eq!(next, (goal as f64 * 1.7).floor() as u32);
            goal = next;
        }
    }
}

/// Piece kind: an index into the active palette, `0..KIND_COUNT`.
///
/// Empty cells are represented as `Option<Kind>::None` by the grid; the save
/// format and the AI protocol encode empty as `-1`.
pub type Kind = u8;

/// Special tag carried by a cell, assigned by match detection and consumed
/// (fired) by the cascade resolver.
///
/// - **LineH**: clears the cell's entire row when fired
/// - **LineV**: clears the cell's entire column when fired
/// - **Bomb**: clears the 3x3 neighborhood around the cell when fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Special {
    #[default]
    None,
    LineH,
    LineV,
    Bomb,
}

impl Special {
    /// Parse a special tag from its wire form (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_candymon_types::Special;
    ///
    /// assert_eq!(Special::from_str("none"), Some(Special::None));
    /// assert_eq!(Special::from_str("LINE_V"), Some(Special::LineV));
    /// assert_eq!(Special::from_str("bomb"), Some(Special::Bomb));
    /// assert_eq!(Special::from_str("nuke"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Special::None),
            "line_h" => Some(Special::LineH),
            "line_v" => Some(Special::LineV),
            "bomb" => Some(Special::Bomb),
            _ => None,
        }
    }

    /// Convert to the lowercase wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Special::None => "none",
            Special::LineH => "line_h",
            Special::LineV => "line_v",
            Special::Bomb => "bomb",
        }
    }

    /// True for any tag other than `None`
    pub fn is_some(&self) -> bool {
        !matches!(self, Special::None)
    }
}

/// A position on the grid, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when the position lies inside the 8x8 grid
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// True when `other` is exactly one cell away horizontally or vertically
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_candymon_types::CellPos;
    ///
    /// let a = CellPos::new(2, 2);
    /// assert!(a.is_adjacent(CellPos::new(2, 3)));
    /// assert!(a.is_adjacent(CellPos::new(1, 2)));
    /// assert!(!a.is_adjacent(CellPos::new(3, 3)));
    /// assert!(!a.is_adjacent(a));
    /// ```
    pub fn is_adjacent(&self, other: CellPos) -> bool {
        let dr = (self.row as i16 - other.row as i16).abs();
        let dc = (self.col as i16 - other.col as i16).abs();
        dr + dc == 1
    }

    /// Flat index into a row-major cell array
    pub fn index(&self) -> usize {
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    /// Position one step in `dir`, if still on the grid
    pub fn step(&self, dir: Dir) -> Option<CellPos> {
        let (dr, dc) = dir.delta();
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || row >= GRID_SIZE as i16 || col < 0 || col >= GRID_SIZE as i16 {
            return None;
        }
        Some(CellPos::new(row as u8, col as u8))
    }
}

/// Cardinal direction for cursor movement and swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Row/column delta for one step in this direction
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// UI-level actions produced by the terminal input layer
///
/// Cursor movement and selection are terminal concerns; the session only
/// ever sees the resulting swaps and mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Move the board cursor one cell
    Move(Dir),
    /// Select the cursor cell, or swap with an adjacent selection
    Select,
    /// Highlight a valid move
    Hint,
    /// Start a fresh session
    Restart,
    /// Start today's daily challenge
    Daily,
    /// Toggle chill mode (unlimited moves)
    ToggleChill,
    /// Toggle the color-blind palette
    ToggleColorBlind,
}
