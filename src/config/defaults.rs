// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Queue**: How many notifications may be visible at once
//! - **Timing**: Hold, exit grace and transition durations

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of notifications visible at once.
pub const DEFAULT_MAX_VISIBLE: usize = 10;

/// Minimum visible capacity.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Maximum visible capacity.
pub const MAX_MAX_VISIBLE: usize = 50;

// ==========================================================================
// Timing Defaults (milliseconds)
// ==========================================================================

/// Default time a notification stays fully visible.
pub const DEFAULT_HOLD_MS: u64 = 10_000;

/// Longest configurable default hold (10 minutes).
pub const MAX_HOLD_MS: u64 = 600_000;

/// Time after the hold before disposal is forced without a transition-end signal.
pub const DEFAULT_EXIT_GRACE_MS: u64 = 500;

/// Maximum exit grace.
pub const MAX_EXIT_GRACE_MS: u64 = 10_000;

/// Duration of the enter and exit transitions.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Maximum transition duration.
pub const MAX_TRANSITION_MS: u64 = 5_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_VISIBLE > 0);
    assert!(MAX_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);

    assert!(DEFAULT_HOLD_MS <= MAX_HOLD_MS);
    assert!(DEFAULT_EXIT_GRACE_MS <= MAX_EXIT_GRACE_MS);
    assert!(DEFAULT_TRANSITION_MS <= MAX_TRANSITION_MS);
};
