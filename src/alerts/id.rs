// SPDX-License-Identifier: MPL-2.0
//! Notification identifiers.
//!
//! Identifiers pair a coarse wall-clock timestamp with a per-manager
//! sequence number, so bursts submitted within the same millisecond still
//! get distinct ids.

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a submitted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId {
    timestamp_ms: u64,
    sequence: u64,
}

impl NotificationId {
    /// Millisecond timestamp taken when the id was minted.
    #[must_use]
    pub fn timestamp_ms(self) -> u64 {
        self.timestamp_ms
    }

    /// Position of this id in its source's sequence (starts at 1).
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}-{}", self.timestamp_ms, self.sequence)
    }
}

/// Mints [`NotificationId`]s.
///
/// The counter lives in the source itself rather than in a global, so each
/// manager instance starts its own sequence. Shared between a manager and
/// its senders through an `Arc`.
#[derive(Debug, Default)]
pub struct IdSource {
    counter: AtomicU64,
}

impl IdSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id.
    pub fn next_id(&self) -> NotificationId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let timestamp_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        NotificationId {
            timestamp_ms,
            sequence,
        }
    }
}
