//! Blockfall (workspace facade crate).
//!
//! Exposes `blockfall::{core,engine,input,term,types}` while the implementation
//! lives in dedicated crates under `crates/`. Startup concerns of the binary
//! (environment configuration and log setup) live here so they can be tested.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
