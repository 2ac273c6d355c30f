// SPDX-License-Identifier: MPL-2.0
//! Single-shot deadline timers polled from frame ticks.

use std::time::{Duration, Instant};

/// A one-shot timer owned by exactly one lifecycle stage.
///
/// The timer fires at most once: [`Timer::fire`] consumes the deadline.
/// Dropping the timer guarantees it never fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Arms a timer that becomes due `after` the given instant.
    #[must_use]
    pub fn arm(now: Instant, after: Duration) -> Self {
        Self {
            deadline: Some(now + after),
        }
    }

    /// Moves the deadline earlier if `candidate` comes first. Never postpones.
    pub fn pull_forward(&mut self, candidate: Instant) {
        self.deadline = match self.deadline {
            Some(current) if current <= candidate => Some(current),
            _ => Some(candidate),
        };
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
