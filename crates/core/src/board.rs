//! Board module - manages the playfield grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array (`row * WIDTH + col`) for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with y < 0 are open space above the field: pieces may overlap them but
//! nothing is ever stored there.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMask;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_CLEAR_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled).
    ///
    /// Rows above the top (y < 0) are never occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether every filled cell of `mask` fits with its origin at (`origin_x`, `origin_y`).
    ///
    /// A cell fails if it is left of column 0, right of the last column, or
    /// below the last row. Cells at y >= 0 also fail on overlap. Cells above
    /// the top are otherwise allowed.
    pub fn is_valid_position(&self, mask: &ShapeMask, origin_x: i8, origin_y: i8) -> bool {
        mask.cells().all(|(col, row)| {
            let x = origin_x + col;
            let y = origin_y + row;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Mark every filled cell of `mask` as `kind`.
    ///
    /// Existing contents are overwritten. Cells above the top are not stored;
    /// the return value is how many were dropped that way.
    pub fn write_cells(&mut self, mask: &ShapeMask, origin_x: i8, origin_y: i8, kind: PieceKind) -> usize {
        let mut hidden = 0;
        for (col, row) in mask.cells() {
            let x = origin_x + col;
            let y = origin_y + row;
            debug_assert!(
                x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8,
                "write_cells out of bounds at ({}, {})",
                x,
                y
            );
            if y < 0 {
                hidden += 1;
                continue;
            }
            self.set(x, y, Some(kind));
        }
        hidden
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Shift every row above `from_row` down by `count`, overwriting `from_row`.
    ///
    /// Row `r - count` moves into row `r` for `r` in `from_row` down to `count`;
    /// the topmost `count` rows become empty. To remove several rows, call
    /// once per row with `count = 1` in ascending row order.
    pub fn shift_rows_down(&mut self, from_row: usize, count: usize) {
        debug_assert!(from_row < HEIGHT, "shift_rows_down row {} out of range", from_row);
        if from_row >= HEIGHT || count == 0 {
            return;
        }
        let count = count.min(from_row + 1);

        // copy_within handles the overlapping ranges.
        for row in (count..=from_row).rev() {
            let src_start = (row - count) * WIDTH;
            let dst_start = row * WIDTH;
            self.cells.copy_within(src_start..src_start + WIDTH, dst_start);
        }

        for cell in &mut self.cells[..count * WIDTH] {
            *cell = None;
        }
    }

    /// Full rows, scanned bottom to top and returned in ascending order.
    pub fn full_rows(&self) -> ArrayVec<usize, MAX_CLEAR_ROWS> {
        let mut rows = ArrayVec::new();
        for y in (0..HEIGHT).rev() {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                debug_assert!(false, "more than {} full rows", MAX_CLEAR_ROWS);
                break;
            }
        }
        rows.reverse();
        rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Encode into a `u8` grid: 0 = empty, `kind.index() + 1` = filled.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * WIDTH;
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = match self.cells[start + x] {
                    Some(kind) => kind.index() as u8 + 1,
                    None => 0,
                };
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` or space is empty; a piece letter (`I J L O S Z T`) fills the cell.
    /// Fewer than 20 rows are aligned to the bottom. Intended for tests;
    /// panics on malformed input.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows");
        let mut board = Self::new();
        let offset = HEIGHT - rows.len();
        for (i, line) in rows.iter().enumerate() {
            assert!(line.chars().count() <= WIDTH, "row {} too wide", i);
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell '{}'", other)),
                    ),
                };
                board.set(x as i8, (offset + i) as i8, cell);
            }
        }
        board
    }

    /// Render each row as text, top row first (inverse of [`Board::from_rows`]).
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(WIDTH)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(kind) => kind.as_str().to_ascii_uppercase(),
                        None => ".".to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
