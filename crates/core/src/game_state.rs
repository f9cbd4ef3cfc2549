//! Game state module - the board simulation
//!
//! [`GameState`] owns the board, the single active piece, the optional
//! next-piece preview, the score and the game status. Every operation runs
//! synchronously to completion; nothing here does I/O or keeps time.
//!
//! The state machine hinges on one rule: a blocked *downward* move locks the
//! piece, while a blocked lateral move or rotation is merely rejected.
//!
//! A spawn that collides is still placed (so the last frame can show it) and
//! flips the status to [`GameStatus::GameOver`]. From then on every operation
//! is a no-op that reports the ended game.

use tracing::{debug, info};

use crate::board::{Board, Grid};
use crate::pieces::{get_shape, spawn_x, MinoOffsets, Shape, SPAWN_Y};
use crate::rng::{PieceSource, Randomizer};
use crate::snapshot::{ActiveCell, ActiveCells, ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a new piece at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_x(kind),
            y: SPAWN_Y,
        }
    }

    /// Matrix for the current rotation
    pub fn shape(&self) -> Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Filled offsets relative to the origin
    pub fn offsets(&self) -> MinoOffsets {
        self.shape().cells()
    }

    /// Filled cells in absolute board coordinates
    pub fn cells(&self) -> ActiveCells {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| ActiveCell {
                x: self.x + dx,
                y: self.y + dy,
                kind: self.kind,
            })
            .collect()
    }

    /// Check if every cell may sit where it is
    pub fn fits(&self, board: &Board) -> bool {
        board.fits(&self.offsets(), self.x, self.y)
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

/// Summary of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub kind: PieceKind,
    pub rows_cleared: u32,
    pub points: u32,
    /// A cell of the locked piece ended up in the top row or above the board
    pub topped_out: bool,
}

/// Construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOptions {
    /// Draw the next kind one piece ahead so it can be shown to the player
    pub preview: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = Randomizer> {
    board: Board,
    active: ActivePiece,
    next: Option<PieceKind>,
    options: GameOptions,
    source: S,
    score: u32,
    lines: u32,
    /// Pieces spawned in this game, including the first
    pieces: u32,
    status: GameStatus,
    last_lock: Option<LockReport>,
}

impl<S: PieceSource> GameState<S> {
    /// Start a game on an empty board without a preview
    pub fn new(source: S) -> Self {
        Self::with_options(source, GameOptions::default())
    }

    pub fn with_options(source: S, options: GameOptions) -> Self {
        Self::with_board(source, options, Board::new())
    }

    /// Start a game on a prepared board.
    ///
    /// The first piece spawns immediately; if it collides with the prepared
    /// cells the game is over before the first move.
    pub fn with_board(mut source: S, options: GameOptions, board: Board) -> Self {
        let first = source.next_kind();
        let mut state = Self {
            board,
            active: ActivePiece::new(first),
            next: None,
            options,
            source,
            score: 0,
            lines: 0,
            pieces: 0,
            status: GameStatus::Running,
            last_lock: None,
        };
        if options.preview {
            state.next = Some(state.source.next_kind());
        }
        state.spawn_piece(first);
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Previewed kind, when the preview is enabled
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Row-major copy of the locked cells
    pub fn grid(&self) -> Grid {
        self.board.to_grid()
    }

    /// Active piece cells in absolute board coordinates
    pub fn active_cells(&self) -> ActiveCells {
        self.active.cells()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take and clear the last lock report.
    pub fn take_last_lock(&mut self) -> Option<LockReport> {
        self.last_lock.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = ActiveSnapshot::from(self.active);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.status = self.status;
        out.paused = false;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Place a new piece of `kind` at its spawn position.
    ///
    /// A colliding spawn is kept for the final frame but ends the game.
    pub fn spawn_piece(&mut self, kind: PieceKind) -> GameStatus {
        if self.game_over() {
            return self.status;
        }

        let piece = ActivePiece::new(kind);
        self.active = piece;
        self.pieces = self.pieces.wrapping_add(1);

        if !piece.fits(&self.board) {
            info!(kind = %kind, score = self.score, "spawn blocked, game over");
            self.status = GameStatus::GameOver;
        }

        self.status
    }

    /// Try to move the active piece by (dx, dy).
    ///
    /// A blocked move with `dy > 0` locks the piece instead.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        if self.game_over() {
            return MoveOutcome::GameOver;
        }

        let candidate = self.active.translated(dx, dy);
        if candidate.fits(&self.board) {
            self.active = candidate;
            return MoveOutcome::Moved;
        }

        if dy > 0 {
            self.lock_and_clear();
            MoveOutcome::Locked
        } else {
            MoveOutcome::Rejected
        }
    }

    /// Try to rotate the active piece 90° clockwise in place (no wall kicks).
    pub fn try_rotate(&mut self) -> RotateOutcome {
        if self.game_over() {
            return RotateOutcome::GameOver;
        }

        let candidate = self.active.rotated_cw();
        if candidate.fits(&self.board) {
            self.active = candidate;
            RotateOutcome::Rotated
        } else {
            RotateOutcome::Rejected
        }
    }

    /// Drop the active piece as far as it goes and lock it.
    pub fn hard_drop(&mut self) -> DropOutcome {
        if self.game_over() {
            return DropOutcome::GameOver;
        }

        let distance = self.drop_distance();
        self.active = self.active.translated(0, distance);
        self.lock_and_clear();
        DropOutcome::Locked
    }

    /// Row the active piece would land on after a hard drop
    pub fn ghost_y(&self) -> i8 {
        self.active.y + self.drop_distance()
    }

    /// Largest `dy >= 0` such that the active piece still fits.
    ///
    /// The floor rejects every row at or below `BOARD_HEIGHT`, so the scan
    /// ends however far above the board the piece starts.
    fn drop_distance(&self) -> i8 {
        let offsets = self.active.offsets();
        let (x, y) = (self.active.x, self.active.y);
        let mut distance: i8 = 0;
        while self.board.fits(&offsets, x, y.saturating_add(distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Start a fresh game: empty board, zero score, same piece source.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.status = GameStatus::Running;
        self.last_lock = None;
        self.next = None;

        let first = self.source.next_kind();
        if self.options.preview {
            self.next = Some(self.source.next_kind());
        }
        self.spawn_piece(first);
        debug!(kind = %first, "restarted");
    }

    /// Lock the active piece onto the board, clear full rows, and spawn the next piece
    fn lock_and_clear(&mut self) -> LockReport {
        let active = self.active;
        let offsets = active.offsets();

        let fully_placed = self
            .board
            .lock_piece(&offsets, active.x, active.y, active.kind);
        let topped_out = !fully_placed || offsets.iter().any(|&(_, dy)| active.y + dy < 1);

        let cleared_rows = self.board.clear_full_rows();
        let rows_cleared = cleared_rows.len() as u32;
        let points = rows_cleared * LINE_CLEAR_POINTS;
        self.score += points;
        self.lines += rows_cleared;

        debug!(
            kind = %active.kind,
            x = active.x,
            y = active.y,
            rows = ?cleared_rows.as_slice(),
            score = self.score,
            "piece locked"
        );

        let report = LockReport {
            kind: active.kind,
            rows_cleared,
            points,
            topped_out,
        };
        self.last_lock = Some(report);

        let kind = self.take_next_kind();
        self.spawn_piece(kind);

        if topped_out && !self.game_over() {
            info!(score = self.score, lines = self.lines, "stack reached the top, game over");
            self.status = GameStatus::GameOver;
        }

        report
    }

    /// Kind for the next spawn, advancing the preview if enabled
    fn take_next_kind(&mut self) -> PieceKind {
        if !self.options.preview {
            return self.source.next_kind();
        }
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_kind(),
        };
        self.next = Some(self.source.next_kind());
        kind
    }
}
