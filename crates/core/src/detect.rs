//! Match detection module - pure run and shape scanning
//!
//! Scans a grid for horizontal and vertical runs of three or more equal
//! kinds, and for T/L shapes that earn a bomb. The scan never mutates the
//! grid: new special tags are returned as proposals, and only the cascade
//! resolver writes them back. Move analysis can therefore probe hypothetical
//! boards without leaving tags behind.
//!
//! Behavior notes, kept faithful to the original rules:
//! - Runs of 4+ propose a line tag on every run cell, even when the group is
//!   later dropped by overlap dedup. The proposal still lands on the board
//!   and fires whenever that cell next joins a cleared group.
//! - Groups are deduped in scan order (all horizontal runs first, then all
//!   vertical). A group reduced below 3 unique cells is dropped, but its
//!   cells stay claimed.
//! - At most one bomb is proposed per scan: the first T or L shape found in
//!   row-major order, tagged at its center.

use arrayvec::ArrayVec;

use tui_candymon_types::{Kind, Special, CELL_COUNT, GRID_SIZE, LINE_RUN, MATCH_RUN};

use crate::grid::Grid;

/// A single run can span at most one full row or column
type Run = ArrayVec<usize, { GRID_SIZE as usize }>;

/// Result of one detection pass over a grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchScan {
    /// Matched groups as flat cell indices, deduped, in scan order
    pub groups: Vec<Vec<usize>>,
    /// Proposed special tags in scan order (line tags, then at most one bomb)
    pub tags: Vec<(usize, Special)>,
}

impl MatchScan {
    /// True when the scan found no groups to clear
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total cells across all surviving groups
    pub fn cleared_cells(&self) -> u32 {
        self.groups.iter().map(|g| g.len() as u32).sum()
    }

    /// True when any surviving group has 4 or more cells
    pub fn has_four_run(&self) -> bool {
        self.groups.iter().any(|g| g.len() >= LINE_RUN)
    }
}

/// Scan the grid for matches
///
/// Empty cells never join a run. The returned tags are proposals only; the
/// grid is left untouched.
pub fn find_matches(grid: &Grid) -> MatchScan {
    let size = GRID_SIZE as usize;
    let cells = grid.cells();

    let mut raw_groups: Vec<Vec<usize>> = Vec::new();
    let mut tags: Vec<(usize, Special)> = Vec::new();

    // horizontal runs
    for row in 0..size {
        let mut run = Run::new();
        let mut run_kind: Option<Kind> = None;
        for col in 0..size {
            let idx = row * size + col;
            let kind = cells[idx].kind;
            if kind.is_some() && kind == run_kind {
                run.push(idx);
            } else {
                flush(&mut run, Special::LineH, &mut tags, &mut raw_groups);
                if kind.is_some() {
                    run.push(idx);
                }
                run_kind = kind;
            }
        }
        flush(&mut run, Special::LineH, &mut tags, &mut raw_groups);
    }

    // vertical runs
    for col in 0..size {
        let mut run = Run::new();
        let mut run_kind: Option<Kind> = None;
        for row in 0..size {
            let idx = row * size + col;
            let kind = cells[idx].kind;
            if kind.is_some() && kind == run_kind {
                run.push(idx);
            } else {
                flush(&mut run, Special::LineV, &mut tags, &mut raw_groups);
                if kind.is_some() {
                    run.push(idx);
                }
                run_kind = kind;
            }
        }
        flush(&mut run, Special::LineV, &mut tags, &mut raw_groups);
    }

    // bomb shapes
    if let Some(center) = find_t_or_l_center(grid) {
        tags.push((center, Special::Bomb));
    }

    // merge groups to unique cells
    let mut visited = [false; CELL_COUNT];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for group in raw_groups {
        let mut unique: Vec<usize> = Vec::with_capacity(group.len());
        for idx in group {
            if !visited[idx] {
                visited[idx] = true;
                unique.push(idx);
            }
        }
        if unique.len() >= MATCH_RUN {
            groups.push(unique);
        }
    }

    MatchScan { groups, tags }
}

/// Close out a run: record it as a group if long enough, proposing line tags
/// on every cell of a 4+ run
fn flush(
    run: &mut Run,
    tag: Special,
    tags: &mut Vec<(usize, Special)>,
    raw_groups: &mut Vec<Vec<usize>>,
) {
    if run.len() >= MATCH_RUN {
        if run.len() >= LINE_RUN {
            for &idx in run.iter() {
                tags.push((idx, tag));
            }
        }
        raw_groups.push(run.to_vec());
    }
    run.clear();
}

/// Find the first T or L shape in row-major order and return its center
///
/// A T is a horizontal triple crossed by a vertical triple at the center.
/// An L is a horizontal triple with a vertical pair hanging from one end of
/// the row below or above. Only interior cells can be centers.
fn find_t_or_l_center(grid: &Grid) -> Option<usize> {
    let size = GRID_SIZE as usize;
    for row in 1..GRID_SIZE - 1 {
        for col in 1..GRID_SIZE - 1 {
            let Some(kind) = grid.kind_at(row, col) else {
                continue;
            };
            let matches = |r: u8, c: u8| grid.kind_at(r, c) == Some(kind);

            let horiz = matches(row, col - 1) && matches(row, col + 1);
            let vert = matches(row - 1, col) && matches(row + 1, col);
            if horiz && vert {
                return Some(row as usize * size + col as usize);
            }

            let below = horiz && matches(row + 1, col) && matches(row + 1, col + 1);
            let above = horiz && matches(row - 1, col) && matches(row - 1, col + 1);
            if below || above {
                return Some(row as usize * size + col as usize);
            }
        }
    }
    None
}
