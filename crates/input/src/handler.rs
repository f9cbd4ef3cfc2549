//! Held soft drop tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! terminal auto-repeat keeps refreshing the hold, and once repeats stop the
//! hold expires on its own.

use crate::types::SOFT_DROP_GRACE_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftDropLatch {
    held: bool,
    since_press_ms: u32,
    release_timeout_ms: u32,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(SOFT_DROP_GRACE_MS)
    }

    pub fn with_release_timeout_ms(release_timeout_ms: u32) -> Self {
        Self {
            held: false,
            since_press_ms: 0,
            release_timeout_ms,
        }
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    /// Key press or auto-repeat. Returns `true` when the hold starts.
    pub fn press(&mut self) -> bool {
        self.since_press_ms = 0;
        let started = !self.held;
        self.held = true;
        started
    }

    /// Key release. Returns `true` when a hold ended.
    pub fn release(&mut self) -> bool {
        self.since_press_ms = 0;
        std::mem::replace(&mut self.held, false)
    }

    /// Advance time. Returns `true` when the hold expired during this update.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if !self.held {
            return false;
        }
        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if self.since_press_ms > self.release_timeout_ms {
            self.release()
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.held = false;
        self.since_press_ms = 0;
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}
