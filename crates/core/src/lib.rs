//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board simulation: grid, piece shapes, piece
//! selection, and the state machine that moves, rotates, locks and clears.
//! It has **no dependencies** on terminal, timing, or I/O:
//!
//! - **Deterministic**: a seeded or scripted [`PieceSource`] replays the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Allocation-free**: hot paths use fixed arrays and `ArrayVec`
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with the placement predicate and line clearing
//! - [`pieces`]: shape matrices and the pure clockwise [`rotate`]
//! - [`rng`]: [`PieceSource`] and the uniform / 7-bag / scripted sources
//! - [`game_state`]: [`GameState`], the simulation itself
//! - [`snapshot`]: copyable per-frame view for renderers
//!
//! # Game Rules
//!
//! - A blocked downward move locks the piece; blocked sideways moves and
//!   rotations are rejected with no state change
//! - Rotation is clockwise only and has no wall kicks
//! - Every cleared row is worth 100 points, with no multi-line bonus
//! - The game ends when a spawn collides or a piece locks in the top row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, ScriptedSource};
//! use blockfall_core::types::{DropOutcome, MoveOutcome, PieceKind};
//!
//! let mut game = GameState::new(ScriptedSource::new([PieceKind::I, PieceKind::O]));
//!
//! assert_eq!(game.try_move(-1, 0), MoveOutcome::Moved);
//! assert_eq!(game.hard_drop(), DropOutcome::Locked);
//!
//! assert_eq!(game.active().kind, PieceKind::O);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, Grid};
pub use game_state::{ActivePiece, GameOptions, GameState, LockReport};
pub use pieces::{base_shape, get_shape, rotate, spawn_x, Shape};
pub use rng::{
    BagSource, PieceSource, Randomizer, RandomizerKind, ScriptedSource, UniformSource,
};
pub use snapshot::{ActiveCell, ActiveCells, ActiveSnapshot, GameSnapshot};
