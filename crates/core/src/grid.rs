//! Grid module - manages the game board
//!
//! The board is an 8x8 grid where each cell holds an optional piece kind and
//! a special tag. Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (row, col) with row 0 at the top.
//!
//! Piece kinds move during swaps, gravity, and shuffles. Special tags are
//! carried by swaps but stay anchored to their grid position through gravity
//! and shuffles, so a tag can outlive the piece that earned it.

use tui_candymon_types::{CellPos, Kind, Special, CELL_COUNT, GRID_SIZE, KIND_COUNT};

use crate::rng::BoardRng;

/// A single board cell: an optional piece kind plus a special tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Piece kind, `None` for an empty cell
    pub kind: Option<Kind>,
    /// Special tag, fired when the cell is part of a cleared match
    pub special: Special,
}

/// The game board - 8x8 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::default(); CELL_COUNT],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: u8, col: u8) -> Option<usize> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        Self::index(pos.row, pos.col).map(|idx| self.cells[idx])
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: CellPos, cell: Cell) -> bool {
        match Self::index(pos.row, pos.col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Piece kind at (row, col), `None` for empty or out of bounds
    #[inline(always)]
    pub fn kind_at(&self, row: u8, col: u8) -> Option<Kind> {
        Self::index(row, col).and_then(|idx| self.cells[idx].kind)
    }

    /// Swap the full cell payloads (kind and special) of two positions
    /// Returns false if either position is out of bounds
    pub fn swap_cells(&mut self, a: CellPos, b: CellPos) -> bool {
        match (Self::index(a.row, a.col), Self::index(b.row, b.col)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Swap only the piece kinds of two positions, leaving specials in place
    ///
    /// This is the probe used by move analysis: a hypothetical swap must not
    /// disturb special tags.
    pub fn swap_kinds(&mut self, a: CellPos, b: CellPos) -> bool {
        match (Self::index(a.row, a.col), Self::index(b.row, b.col)) {
            (Some(ia), Some(ib)) => {
                let k = self.cells[ia].kind;
                self.cells[ia].kind = self.cells[ib].kind;
                self.cells[ib].kind = k;
                true
            }
            _ => false,
        }
    }

    /// True when a piece of `kind` placed at (row, col) would complete a
    /// leftward or upward run of three
    fn would_triple(&self, row: u8, col: u8, kind: Kind) -> bool {
        if col >= 2
            && self.kind_at(row, col - 1) == Some(kind)
            && self.kind_at(row, col - 2) == Some(kind)
        {
            return true;
        }
        if row >= 2
            && self.kind_at(row - 1, col) == Some(kind)
            && self.kind_at(row - 2, col) == Some(kind)
        {
            return true;
        }
        false
    }

    /// Fill the whole grid with random kinds, avoiding any starting run of
    /// three
    ///
    /// Fills row-major and redraws each cell until it does not complete a
    /// leftward or upward triple, so a fresh board never starts mid-cascade.
    /// All specials are reset.
    pub fn fill_constructive(&mut self, rng: &mut BoardRng, active_kinds: u8) {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let mut kind = rng.next_range(active_kinds as u32) as Kind;
                while self.would_triple(row, col, kind) {
                    kind = rng.next_range(active_kinds as u32) as Kind;
                }
                let idx = (row as usize) * (GRID_SIZE as usize) + (col as usize);
                self.cells[idx] = Cell {
                    kind: Some(kind),
                    special: Special::None,
                };
            }
        }
    }

    /// Apply gravity: in each column, pull kinds down into empty cells
    ///
    /// Only kinds move. Special tags stay at their grid positions.
    /// Returns the number of cells that moved.
    pub fn collapse_columns(&mut self) -> u32 {
        let size = GRID_SIZE as usize;
        let mut dropped = 0u32;
        for col in 0..size {
            for row in (0..size).rev() {
                if self.cells[row * size + col].kind.is_some() {
                    continue;
                }
                // Pull the nearest kind from above
                for above in (0..row).rev() {
                    if let Some(kind) = self.cells[above * size + col].kind {
                        self.cells[row * size + col].kind = Some(kind);
                        self.cells[above * size + col].kind = None;
                        dropped += 1;
                        break;
                    }
                }
            }
        }
        dropped
    }

    /// Fill every empty cell with a fresh random kind
    ///
    /// Scans column-major, top to bottom within each column, so the draw
    /// order is stable for a given board. Specials are left untouched.
    /// Returns the number of cells filled.
    pub fn refill(&mut self, rng: &mut BoardRng, active_kinds: u8) -> u32 {
        let size = GRID_SIZE as usize;
        let mut filled = 0u32;
        for col in 0..size {
            for row in 0..size {
                let idx = row * size + col;
                if self.cells[idx].kind.is_none() {
                    self.cells[idx].kind = Some(rng.next_range(active_kinds as u32) as Kind);
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Shuffle the piece kinds across the whole board, leaving specials
    /// anchored at their positions
    pub fn shuffle_kinds(&mut self, rng: &mut BoardRng) {
        let mut kinds = [None; CELL_COUNT];
        for (slot, cell) in kinds.iter_mut().zip(self.cells.iter()) {
            *slot = cell.kind;
        }
        rng.shuffle(&mut kinds);
        for (cell, kind) in self.cells.iter_mut().zip(kinds.iter()) {
            cell.kind = *kind;
        }
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.kind.is_some())
    }

    /// Export kinds as an 8x8 signed grid, `-1` for empty
    ///
    /// This is the layout used by the save format and the AI protocol.
    pub fn kinds_i8(&self) -> [[i8; GRID_SIZE as usize]; GRID_SIZE as usize] {
        let size = GRID_SIZE as usize;
        let mut out = [[-1i8; GRID_SIZE as usize]; GRID_SIZE as usize];
        for row in 0..size {
            for col in 0..size {
                if let Some(kind) = self.cells[row * size + col].kind {
                    out[row][col] = kind as i8;
                }
            }
        }
        out
    }

    /// Export specials as an 8x8 grid
    pub fn specials(&self) -> [[Special; GRID_SIZE as usize]; GRID_SIZE as usize] {
        let size = GRID_SIZE as usize;
        let mut out = [[Special::None; GRID_SIZE as usize]; GRID_SIZE as usize];
        for row in 0..size {
            for col in 0..size {
                out[row][col] = self.cells[row * size + col].special;
            }
        }
        out
    }

    /// Build a grid from an 8x8 signed kind layout, `-1` for empty
    ///
    /// Returns None if any value falls outside `-1..KIND_COUNT`. Specials
    /// start cleared; they are not part of the persisted layout.
    pub fn from_kinds_i8(kinds: &[[i8; GRID_SIZE as usize]; GRID_SIZE as usize]) -> Option<Self> {
        let size = GRID_SIZE as usize;
        let mut grid = Self::new();
        for row in 0..size {
            for col in 0..size {
                let value = kinds[row][col];
                let kind = match value {
                    -1 => None,
                    k if (0..KIND_COUNT as i8).contains(&k) => Some(k as Kind),
                    _ => return None,
                };
                grid.cells[row * size + col] = Cell {
                    kind,
                    special: Special::None,
                };
            }
        }
        Some(grid)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a mutable reference to the internal cells array
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
