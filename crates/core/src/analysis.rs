//! Board analysis module - move availability and reshuffling
//!
//! Probes hypothetical swaps against the pure detector, so analysis never
//! leaves a mark on the real board: probe swaps move kinds only, and the
//! detector proposes tags without writing them.

use tui_candymon_types::{CellPos, Dir, GRID_SIZE, RESHUFFLE_RETRY_LIMIT};

use crate::detect::find_matches;
use crate::grid::Grid;
use crate::rng::BoardRng;

/// How `ensure_playable` left the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReshuffleOutcome {
    /// Board already had a move; nothing changed
    AlreadyPlayable,
    /// Kinds were shuffled in place until a move appeared
    Shuffled,
    /// Shuffling kept failing, so the board was refilled from scratch
    Rebuilt,
}

/// True when at least one adjacent swap creates a match
///
/// Probes each cell's right and down neighbor, which covers every adjacent
/// pair once.
pub fn has_any_move(grid: &Grid) -> bool {
    let mut probe = grid.clone();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let here = CellPos::new(row, col);
            for dir in [Dir::Right, Dir::Down] {
                let Some(other) = here.step(dir) else {
                    continue;
                };
                probe.swap_kinds(here, other);
                let hit = !find_matches(&probe).is_empty();
                probe.swap_kinds(here, other);
                if hit {
                    return true;
                }
            }
        }
    }
    false
}

/// Find the first valid move in scan order, for hints
///
/// Scans cells row-major and tries neighbors right, down, left, up, the
/// same order the board highlights hints in. Returns the swap pair.
pub fn find_move(grid: &Grid) -> Option<(CellPos, CellPos)> {
    let mut probe = grid.clone();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let here = CellPos::new(row, col);
            for dir in [Dir::Right, Dir::Down, Dir::Left, Dir::Up] {
                let Some(other) = here.step(dir) else {
                    continue;
                };
                probe.swap_kinds(here, other);
                let hit = !find_matches(&probe).is_empty();
                probe.swap_kinds(here, other);
                if hit {
                    return Some((here, other));
                }
            }
        }
    }
    None
}

/// True when the board is in a state a player can act on: full, settled,
/// and with at least one available move
fn is_playable(grid: &Grid) -> bool {
    grid.is_full() && find_matches(grid).is_empty() && has_any_move(grid)
}

/// Make sure the board is playable, reshuffling if it is not
///
/// Shuffles kinds in place, keeping specials anchored, until the board is
/// full, match-free, and has a move. If that keeps failing the board is
/// rebuilt with a constructive fill, which cannot start with matches.
pub fn ensure_playable(grid: &mut Grid, rng: &mut BoardRng, active_kinds: u8) -> ReshuffleOutcome {
    if is_playable(grid) {
        return ReshuffleOutcome::AlreadyPlayable;
    }
    for _ in 0..RESHUFFLE_RETRY_LIMIT {
        grid.shuffle_kinds(rng);
        if is_playable(grid) {
            return ReshuffleOutcome::Shuffled;
        }
    }
    for _ in 0..RESHUFFLE_RETRY_LIMIT {
        grid.fill_constructive(rng, active_kinds);
        if has_any_move(grid) {
            break;
        }
    }
    ReshuffleOutcome::Rebuilt
}
