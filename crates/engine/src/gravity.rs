//! Gravity timer.
//!
//! Converts elapsed wall time into discrete one-row steps. The interval is
//! shortened while the soft drop modifier is held.

use crate::types::{FALL_INTERVAL_MS, SOFT_DROP_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gravity {
    fall_ms: u32,
    soft_drop_ms: u32,
    accumulator_ms: u32,
    soft_drop: bool,
}

impl Gravity {
    /// Intervals are clamped to at least 1ms.
    pub fn new(fall_ms: u32, soft_drop_ms: u32) -> Self {
        Self {
            fall_ms: fall_ms.max(1),
            soft_drop_ms: soft_drop_ms.max(1),
            accumulator_ms: 0,
            soft_drop: false,
        }
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Switching speed restarts the interval so the new speed applies at once.
    pub fn set_soft_drop(&mut self, held: bool) {
        if self.soft_drop != held {
            self.soft_drop = held;
            self.accumulator_ms = 0;
        }
    }

    pub fn interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.soft_drop_ms
        } else {
            self.fall_ms
        }
    }

    /// Add elapsed time and return how many rows the piece should fall.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let interval = self.interval_ms();
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let steps = self.accumulator_ms / interval;
        self.accumulator_ms %= interval;
        steps
    }

    /// Forget partial progress (after a lock or restart).
    pub fn reset(&mut self) {
        self.accumulator_ms = 0;
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(FALL_INTERVAL_MS, SOFT_DROP_INTERVAL_MS)
    }
}
