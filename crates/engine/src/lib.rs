//! Engine module - timing and event dispatch around the simulation
//!
//! [`blockfall_core::GameState`] knows nothing about time or pausing. This
//! crate adds the two pieces a playable loop needs:
//!
//! - [`gravity`]: turns elapsed milliseconds into one-row falls, with a faster
//!   interval while soft drop is held
//! - [`driver`]: applies [`Event`]s (ticks, player actions, soft drop, quit) to a
//!   game and tracks pause state
//!
//! ```
//! use blockfall_engine::{Driver, Event, Gravity};
//! use blockfall_engine::core::{GameState, ScriptedSource};
//! use blockfall_engine::types::{GameAction, PieceKind};
//!
//! let game = GameState::new(ScriptedSource::new([PieceKind::T]));
//! let mut driver = Driver::new(game, Gravity::default());
//!
//! driver.handle(Event::Tick(500));
//! assert_eq!(driver.game().active().y, 1);
//!
//! let step = driver.handle(Event::Action(GameAction::HardDrop));
//! assert_eq!(step.locks, 1);
//! ```

pub mod driver;
pub mod gravity;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use driver::{Driver, Event, Step};
pub use gravity::Gravity;
