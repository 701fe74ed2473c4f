//! Cascade resolution module - applying tags, firing specials, clearing
//!
//! The cascade loop itself lives in the session; this module provides its
//! mechanical steps as pure grid transforms.
//!
//! Firing rules, kept faithful to the original:
//! - Specials are collected from the cleared groups in group order before
//!   any blast lands, so a special still fires even when an earlier blast
//!   already emptied its cell.
//! - A blast empties kinds only. Tags on other cells survive the blast and
//!   stay armed until their cell joins a cleared group.
//! - Only the fired cell's own tag is consumed.
//!
//! Because every cell of a 4+ run carries a line tag, a 4-run fires its row
//! or column once per run cell in the same cycle. Specials persist across
//! cycles only when their proposing group was dropped by overlap dedup.

use arrayvec::ArrayVec;

use tui_candymon_types::{Special, CELL_COUNT, GRID_SIZE};

use crate::grid::Grid;

/// Counts of special blasts fired in one cascade cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlastReport {
    pub lines_fired: u32,
    pub bombs_fired: u32,
}

/// Write proposed tags onto the grid, later proposals winning on conflict
pub fn apply_tags(grid: &mut Grid, tags: &[(usize, Special)]) {
    let cells = grid.cells_mut();
    for &(idx, tag) in tags {
        cells[idx].special = tag;
    }
}

/// Fire every special sitting on a cell of the given groups
///
/// Blasts empty kinds in the affected row, column, or 3x3 neighborhood and
/// then consume the fired cell's tag. Returns how many line and bomb blasts
/// went off.
pub fn fire_specials(grid: &mut Grid, groups: &[Vec<usize>]) -> BlastReport {
    let size = GRID_SIZE as usize;

    // Group cells are unique, so at most one entry per board cell
    let mut armed: ArrayVec<(usize, Special), CELL_COUNT> = ArrayVec::new();
    {
        let cells = grid.cells();
        for group in groups {
            for &idx in group {
                let special = cells[idx].special;
                if special.is_some() {
                    armed.push((idx, special));
                }
            }
        }
    }

    let mut report = BlastReport::default();
    let cells = grid.cells_mut();
    for (idx, special) in armed {
        let row = idx / size;
        let col = idx % size;
        match special {
            Special::LineH => {
                for c in 0..size {
                    cells[row * size + c].kind = None;
                }
                report.lines_fired += 1;
            }
            Special::LineV => {
                for r in 0..size {
                    cells[r * size + col].kind = None;
                }
                report.lines_fired += 1;
            }
            Special::Bomb => {
                for r in row.saturating_sub(1)..=(row + 1).min(size - 1) {
                    for c in col.saturating_sub(1)..=(col + 1).min(size - 1) {
                        cells[r * size + c].kind = None;
                    }
                }
                report.bombs_fired += 1;
            }
            Special::None => {}
        }
        cells[idx].special = Special::None;
    }
    report
}

/// Empty the kinds of every group cell and return the cleared count
///
/// Only group cells score; cells swept by blasts do not. Tags on group cells
/// are left alone here, since `fire_specials` has already consumed any that
/// fired.
pub fn clear_groups(grid: &mut Grid, groups: &[Vec<usize>]) -> u32 {
    let mut cleared = 0u32;
    let cells = grid.cells_mut();
    for group in groups {
        cleared += group.len() as u32;
        for &idx in group {
            cells[idx].kind = None;
        }
    }
    cleared
}
