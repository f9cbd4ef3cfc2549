//! Event-driven driver around the simulation.
//!
//! The binary translates terminal input and wall time into [`Event`]s and feeds
//! them here one at a time. Each event is processed to completion before the
//! next, and the caller renders afterwards.

use tracing::{debug, info};

use crate::core::{GameSnapshot, GameState, PieceSource, Randomizer};
use crate::gravity::Gravity;
use crate::types::{DropOutcome, GameAction, MoveOutcome, RotateOutcome};

/// A discrete input to the driving loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Wall time elapsed since the previous tick, in milliseconds
    Tick(u32),
    Action(GameAction),
    /// Soft drop modifier pressed (`true`) or released (`false`)
    SoftDrop(bool),
    Quit,
}

/// What a single event did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// The active piece moved or rotated without locking
    pub moved: bool,
    pub locks: u32,
    pub rows_cleared: u32,
    pub points: u32,
    /// The game ended during this event
    pub game_over: bool,
    pub restarted: bool,
}

pub struct Driver<S = Randomizer> {
    game: GameState<S>,
    gravity: Gravity,
    paused: bool,
    quit: bool,
}

impl<S: PieceSource> Driver<S> {
    pub fn new(game: GameState<S>, gravity: Gravity) -> Self {
        Self {
            game,
            gravity,
            paused: false,
            quit: false,
        }
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn gravity(&self) -> &Gravity {
        &self.gravity
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// A quit event has been received
    pub fn finished(&self) -> bool {
        self.quit
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn handle(&mut self, event: Event) -> Step {
        if self.quit {
            return Step::default();
        }

        let was_over = self.game.game_over();
        let mut step = match event {
            Event::Tick(elapsed_ms) => self.tick(elapsed_ms),
            Event::Action(action) => self.apply_action(action),
            Event::SoftDrop(held) => {
                self.gravity.set_soft_drop(held);
                Step::default()
            }
            Event::Quit => {
                debug!("quit requested");
                self.quit = true;
                Step::default()
            }
        };

        if !was_over && self.game.game_over() {
            step.game_over = true;
            info!(
                score = self.game.score(),
                lines = self.game.lines(),
                pieces = self.game.pieces(),
                "game over"
            );
        }
        step
    }

    fn tick(&mut self, elapsed_ms: u32) -> Step {
        let mut step = Step::default();
        if self.paused || self.game.game_over() {
            return step;
        }

        for _ in 0..self.gravity.advance(elapsed_ms) {
            match self.game.try_move(0, 1) {
                MoveOutcome::Moved => step.moved = true,
                MoveOutcome::Locked => {
                    self.record_lock(&mut step);
                    self.gravity.reset();
                    break;
                }
                MoveOutcome::Rejected | MoveOutcome::GameOver => break,
            }
        }
        step
    }

    fn apply_action(&mut self, action: GameAction) -> Step {
        let mut step = Step::default();

        match action {
            GameAction::Restart => {
                self.game.restart();
                self.gravity.reset();
                self.paused = false;
                step.restarted = true;
                info!("new game");
                return step;
            }
            GameAction::Pause => {
                if !self.game.game_over() {
                    self.paused = !self.paused;
                    debug!(paused = self.paused, "pause toggled");
                }
                return step;
            }
            _ => {}
        }

        if self.paused {
            return step;
        }

        match action {
            GameAction::MoveLeft => step.moved = self.game.try_move(-1, 0) == MoveOutcome::Moved,
            GameAction::MoveRight => step.moved = self.game.try_move(1, 0) == MoveOutcome::Moved,
            GameAction::Rotate => step.moved = self.game.try_rotate() == RotateOutcome::Rotated,
            GameAction::HardDrop => {
                if self.game.hard_drop() == DropOutcome::Locked {
                    self.record_lock(&mut step);
                    self.gravity.reset();
                }
            }
            GameAction::Pause | GameAction::Restart => {}
        }
        step
    }

    fn record_lock(&mut self, step: &mut Step) {
        if let Some(report) = self.game.take_last_lock() {
            step.locks += 1;
            step.rows_cleared += report.rows_cleared;
            step.points += report.points;
            if report.rows_cleared > 0 {
                debug!(
                    rows = report.rows_cleared,
                    points = report.points,
                    score = self.game.score(),
                    "lines cleared"
                );
            }
        }
    }
}
