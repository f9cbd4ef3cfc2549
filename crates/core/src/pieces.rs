//! Pieces module - shape matrices and clockwise rotation
//!
//! Every kind is defined once as a small boolean matrix in spawn orientation.
//! Other orientations are derived by [`rotate`], never stored.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Largest matrix side supported by [`Shape`]
pub const MAX_SPAN: usize = 4;

/// Offset of a single mino relative to the piece origin (column, row)
pub type MinoOffset = (i8, i8);

/// Filled cells of a shape, in row-major order
pub type MinoOffsets = ArrayVec<MinoOffset, { MAX_SPAN * MAX_SPAN }>;

/// Spawn-orientation matrices, indexed by [`PieceKind::index`]
const SHAPE_TABLE: [&[&[u8]]; 7] = [
    // I
    &[&[1, 1, 1, 1]],
    // O
    &[&[1, 1], &[1, 1]],
    // T
    &[&[0, 1, 0], &[1, 1, 1]],
    // S
    &[&[0, 1, 1], &[1, 1, 0]],
    // Z
    &[&[1, 1, 0], &[0, 1, 1]],
    // J
    &[&[1, 0, 0], &[1, 1, 1]],
    // L
    &[&[0, 0, 1], &[1, 1, 1]],
];

/// A boolean matrix of at most `MAX_SPAN x MAX_SPAN` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [[bool; MAX_SPAN]; MAX_SPAN],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Anything beyond `MAX_SPAN` rows or columns is ignored. Ragged rows are
    /// padded with empty cells up to the widest row.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SPAN]; MAX_SPAN];
        let height = rows.len().min(MAX_SPAN);
        let mut width = 0;

        for (y, row) in rows.iter().take(MAX_SPAN).enumerate() {
            width = width.max(row.len().min(MAX_SPAN));
            for (x, &v) in row.iter().take(MAX_SPAN).enumerate() {
                cells[y][x] = v != 0;
            }
        }

        Self {
            width: width as u8,
            height: height as u8,
            rows: cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at column `x`, row `y` is filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.rows[y][x]
    }

    /// Offsets of all filled cells, row by row
    pub fn cells(&self) -> MinoOffsets {
        let mut out = MinoOffsets::new();
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                if self.rows[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.rows
            .iter()
            .take(self.height as usize)
            .map(|row| row[..self.width as usize].iter().filter(|&&c| c).count())
            .sum()
    }
}

/// Rotate a matrix 90° clockwise.
///
/// `rotated[i][j] = original[h - 1 - j][i]`: the result is `h` wide and `w`
/// tall. Pure, independent of any board.
pub fn rotate(shape: &Shape) -> Shape {
    let w = shape.width as usize;
    let h = shape.height as usize;
    let mut rows = [[false; MAX_SPAN]; MAX_SPAN];

    for (i, out_row) in rows.iter_mut().enumerate().take(w) {
        for (j, out) in out_row.iter_mut().enumerate().take(h) {
            *out = shape.rows[h - 1 - j][i];
        }
    }

    Shape {
        width: shape.height,
        height: shape.width,
        rows,
    }
}

/// Spawn-orientation matrix of a kind
pub fn base_shape(kind: PieceKind) -> Shape {
    Shape::from_rows(SHAPE_TABLE[kind.index()])
}

/// Matrix of a kind after `rotation` clockwise quarter turns
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> Shape {
    let mut shape = base_shape(kind);
    for _ in 0..rotation.quarter_turns() {
        shape = rotate(&shape);
    }
    shape
}

/// Spawn column that centres the piece horizontally: `COLS/2 - width/2`
pub fn spawn_x(kind: PieceKind) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (base_shape(kind).width() / 2) as i8
}

/// Spawn row for every piece
pub const SPAWN_Y: i8 = 0;
