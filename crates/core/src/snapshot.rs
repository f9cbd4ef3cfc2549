use arrayvec::ArrayVec;

use crate::game_state::ActivePiece;
use crate::pieces::{get_shape, MAX_SPAN};
use crate::types::{GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// One cell of the active piece in absolute board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveCell {
    pub x: i8,
    pub y: i8,
    pub kind: PieceKind,
}

impl ActiveCell {
    /// Whether the cell is inside the visible board (pieces may poke above row 0)
    pub fn is_visible(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }
}

pub type ActiveCells = ArrayVec<ActiveCell, { MAX_SPAN * MAX_SPAN }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Absolute cells of the piece at row `y` (pass `self.y` for the piece itself)
    pub fn cells_at(&self, y: i8) -> ActiveCells {
        get_shape(self.kind, self.rotation)
            .cells()
            .iter()
            .map(|&(dx, dy)| ActiveCell {
                x: self.x + dx,
                y: y + dy,
                kind: self.kind,
            })
            .collect()
    }

    pub fn cells(&self) -> ActiveCells {
        self.cells_at(self.y)
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl Default for ActiveSnapshot {
    fn default() -> Self {
        ActivePiece::new(PieceKind::I).into()
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// `0` is empty, `1..=7` is `PieceKind::index() + 1`
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub ghost_y: i8,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub status: GameStatus,
    /// Set by the driving loop; the simulation itself has no pause state
    pub paused: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn playable(&self) -> bool {
        !self.game_over() && !self.paused
    }

    /// Kind stored in a board cell, if occupied
    pub fn cell_kind(&self, x: usize, y: usize) -> Option<PieceKind> {
        let v = *self.board.get(y)?.get(x)?;
        PieceKind::from_index((v as usize).checked_sub(1)?)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: ActiveSnapshot::default(),
            ghost_y: 0,
            next: None,
            score: 0,
            lines: 0,
            pieces: 0,
            status: GameStatus::Running,
            paused: false,
        }
    }
}
