//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::MinoOffset;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by a single clear, top to bottom
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Row-major copy of every cell
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

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

    /// Build a board from a row-major grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            board.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(row);
        }
        board
    }

    /// Build a board from text rows aligned to the bottom of the board.
    ///
    /// `.` or space is empty, a piece letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`,
    /// case-insensitive) fills the cell with that kind, any other character fills
    /// it with `I`. Rows longer than the board are truncated, extra rows at the
    /// top are dropped.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_ascii(&["T.........", "IIIIIIIII."]);
    /// assert!(board.is_occupied(0, 18));
    /// assert!(!board.is_row_full(19));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = rows.len().saturating_sub(BOARD_HEIGHT as usize);
        let first_y = BOARD_HEIGHT as usize - (rows.len() - skip);

        for (dy, row) in rows.iter().skip(skip).enumerate() {
            let y = (first_y + dy) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
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

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Whether a piece cell may sit at (x, y).
    ///
    /// The column must be on the board and the row above the floor. Up to one
    /// board height of rows above the top (negative) are open space; rows on
    /// the board must be empty.
    #[inline]
    pub fn accepts(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return y >= -(BOARD_HEIGHT as i8);
        }
        self.is_valid(x, y)
    }

    /// Whether every offset of a shape placed at (x, y) is accepted
    pub fn fits(&self, offsets: &[MinoOffset], x: i8, y: i8) -> bool {
        offsets
            .iter()
            .all(|&(dx, dy)| self.accepts(x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row at once and compact the rest downwards.
    ///
    /// Remaining rows keep their relative order and the same number of empty
    /// rows appear at the top. Returns the removed row indices (as they were
    /// before compaction) from top to bottom.
    /// Uses a two-pointer pass with zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * width].fill(None);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Write a piece into the board at (x, y), tagged with `kind`.
    ///
    /// Cells above the board cannot be stored and are skipped. Returns false
    /// if any cell was skipped, i.e. the piece locked partly above the top.
    pub fn lock_piece(&mut self, offsets: &[MinoOffset], x: i8, y: i8, kind: PieceKind) -> bool {
        let mut fully_placed = true;
        for &(dx, dy) in offsets {
            if !self.set(x + dx, y + dy, Some(kind)) {
                fully_placed = false;
            }
        }
        fully_placed
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major copy of the board
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (dst, src) in grid.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        grid
    }

    /// Encode the board as `0` for empty and `1..=7` for piece kinds
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map(|k| k.index() as u8 + 1).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
