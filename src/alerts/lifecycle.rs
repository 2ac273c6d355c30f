// SPDX-License-Identifier: MPL-2.0
//! Per-notification lifecycle: `Entering -> Held -> Exiting -> Disposed`.
//!
//! Timers live inside the stage that armed them. Every transition replaces
//! the stage, so a timer can never outlive the phase it belongs to, and the
//! terminal `Disposed` stage owns none.

use super::timer::Timer;
use crate::config::{DEFAULT_EXIT_GRACE_MS, DEFAULT_TRANSITION_MS};
use std::mem;
use std::time::{Duration, Instant};

/// Vertical distance (px) a card slides while fading in or out.
pub const SLIDE_DISTANCE: f32 = 8.0;

/// Observable lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Visible but not yet painted; waits for the next frame.
    Entering,
    /// Fully shown, hold timer running.
    Held,
    /// Exit transition running.
    Exiting,
    /// Removed from all queue state.
    Disposed,
}

/// Timing shared by every lifecycle of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Extra time after the hold (or after a manual close) before disposal is
    /// forced even without a transition-end signal.
    pub exit_grace: Duration,
    /// Length of the enter and exit transitions.
    pub transition: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            exit_grace: Duration::from_millis(DEFAULT_EXIT_GRACE_MS),
            transition: Duration::from_millis(DEFAULT_TRANSITION_MS),
        }
    }
}

#[derive(Debug)]
enum Stage {
    Entering,
    Held {
        since: Instant,
        hold: Timer,
        fallback: Timer,
    },
    Exiting {
        since: Instant,
        fallback: Timer,
    },
    Disposed,
}

/// Lifecycle of a single visible notification.
#[derive(Debug)]
pub struct Lifecycle {
    stage: Stage,
    hold: Duration,
    timing: Timing,
}

impl Lifecycle {
    #[must_use]
    pub fn new(hold: Duration, timing: Timing) -> Self {
        Self {
            stage: Stage::Entering,
            hold,
            timing,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Entering => Phase::Entering,
            Stage::Held { .. } => Phase::Held,
            Stage::Exiting { .. } => Phase::Exiting,
            Stage::Disposed => Phase::Disposed,
        }
    }

    /// Advances the lifecycle on a paint frame.
    ///
    /// Returns `true` if this call disposed the item.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if matches!(self.stage, Stage::Entering) {
            self.stage = Stage::Held {
                since: now,
                hold: Timer::arm(now, self.hold),
                fallback: Timer::arm(now, self.hold + self.timing.exit_grace),
            };
        }

        let hold_elapsed = match &mut self.stage {
            Stage::Held { hold, .. } => hold.fire(now),
            _ => false,
        };
        if hold_elapsed {
            self.begin_exit(now);
        }

        let (fallback_due, transition_done) = match &mut self.stage {
            Stage::Exiting { since, fallback } => (
                fallback.fire(now),
                now.saturating_duration_since(*since) >= self.timing.transition,
            ),
            _ => (false, false),
        };

        if fallback_due {
            self.dispose()
        } else if transition_done {
            self.on_transition_end()
        } else {
            false
        }
    }

    /// Starts the exit transition (close control, action, or hold timeout).
    ///
    /// Returns `false` if the item is already exiting or disposed.
    pub fn begin_exit(&mut self, now: Instant) -> bool {
        let grace_deadline = now + self.timing.exit_grace;
        match mem::replace(&mut self.stage, Stage::Disposed) {
            Stage::Entering => {
                self.stage = Stage::Exiting {
                    since: now,
                    fallback: Timer::arm(now, self.timing.exit_grace),
                };
                true
            }
            Stage::Held { mut fallback, .. } => {
                fallback.pull_forward(grace_deadline);
                self.stage = Stage::Exiting {
                    since: now,
                    fallback,
                };
                true
            }
            stage @ (Stage::Exiting { .. } | Stage::Disposed) => {
                self.stage = stage;
                false
            }
        }
    }

    /// Handles the exit transition's finished signal.
    ///
    /// Only meaningful while exiting; returns `true` if it disposed the item.
    pub fn on_transition_end(&mut self) -> bool {
        if matches!(self.stage, Stage::Exiting { .. }) {
            self.dispose()
        } else {
            false
        }
    }

    fn dispose(&mut self) -> bool {
        !matches!(mem::replace(&mut self.stage, Stage::Disposed), Stage::Disposed)
    }

    /// Card opacity at `now`, in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match &self.stage {
            Stage::Entering | Stage::Disposed => 0.0,
            Stage::Held { since, .. } => ease_out(self.progress(*since, now)),
            Stage::Exiting { since, .. } => 1.0 - ease_out(self.progress(*since, now)),
        }
    }

    /// Downward offset of the card at `now`, in pixels.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f32 {
        (1.0 - self.opacity(now)) * SLIDE_DISTANCE
    }

    fn progress(&self, since: Instant, now: Instant) -> f32 {
        if self.timing.transition.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(since).as_secs_f32();
        (elapsed / self.timing.transition.as_secs_f32()).clamp(0.0, 1.0)
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_millis(10_000);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn slow_exit() -> Timing {
        Timing {
            exit_grace: ms(500),
            transition: ms(2_000),
        }
    }

    #[test]
    fn starts_entering_and_holds_on_first_frame() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(HOLD, Timing::default());
        assert_eq!(lifecycle.phase(), Phase::Entering);

        assert!(!lifecycle.on_frame(start));
        assert_eq!(lifecycle.phase(), Phase::Held);
    }

    #[test]
    fn hold_timeout_begins_exit_then_transition_disposes() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(ms(1_000), Timing::default());
        lifecycle.on_frame(start);

        assert!(!lifecycle.on_frame(start + ms(999)));
        assert_eq!(lifecycle.phase(), Phase::Held);

        assert!(!lifecycle.on_frame(start + ms(1_000)));
        assert_eq!(lifecycle.phase(), Phase::Exiting);

        assert!(lifecycle.on_frame(start + ms(1_300)));
        assert_eq!(lifecycle.phase(), Phase::Disposed);
    }

    #[test]
    fn manual_exit_short_circuits_hold() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(HOLD, Timing::default());
        lifecycle.on_frame(start);

        assert!(lifecycle.begin_exit(start + ms(10)));
        assert_eq!(lifecycle.phase(), Phase::Exiting);
    }

    #[test]
    fn only_first_exit_trigger_wins() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(HOLD, Timing::default());
        lifecycle.on_frame(start);

        assert!(lifecycle.begin_exit(start));
        assert!(!lifecycle.begin_exit(start + ms(5)));
    }

    #[test]
    fn fallback_disposes_when_transition_never_finishes() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(ms(1_000), slow_exit());
        lifecycle.on_frame(start);
        lifecycle.on_frame(start + ms(1_000));
        assert_eq!(lifecycle.phase(), Phase::Exiting);

        assert!(!lifecycle.on_frame(start + ms(1_499)));
        assert!(lifecycle.on_frame(start + ms(1_500)));
        assert_eq!(lifecycle.phase(), Phase::Disposed);
    }

    #[test]
    fn manual_close_pulls_fallback_forward() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(ms(100), slow_exit());
        lifecycle.on_frame(start);

        // 90ms + grace lands before the 600ms armed on entry.
        lifecycle.begin_exit(start + ms(90));
        assert!(!lifecycle.on_frame(start + ms(589)));
        assert!(lifecycle.on_frame(start + ms(590)));
    }

    #[test]
    fn disposal_happens_exactly_once() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(Duration::ZERO, Timing::default());
        lifecycle.on_frame(start);
        assert_eq!(lifecycle.phase(), Phase::Exiting);

        assert!(lifecycle.on_transition_end());
        assert!(!lifecycle.on_transition_end());
        assert!(!lifecycle.on_frame(start + ms(10_000)));
    }

    #[test]
    fn transition_end_is_ignored_unless_exiting() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(HOLD, Timing::default());
        assert!(!lifecycle.on_transition_end());

        lifecycle.on_frame(start);
        assert!(!lifecycle.on_transition_end());
        assert_eq!(lifecycle.phase(), Phase::Held);
    }

    #[test]
    fn close_before_first_frame_still_disposes() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(HOLD, slow_exit());

        assert!(lifecycle.begin_exit(start));
        assert!(lifecycle.on_frame(start + ms(500)));
    }

    #[test]
    fn sparse_frames_jump_straight_to_disposal() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(ms(1_000), slow_exit());
        lifecycle.on_frame(start);

        assert!(lifecycle.on_frame(start + ms(60_000)));
    }

    #[test]
    fn opacity_fades_in_and_out() {
        let start = Instant::now();
        let mut lifecycle = Lifecycle::new(ms(1_000), Timing::default());
        assert_eq!(lifecycle.opacity(start), 0.0);

        lifecycle.on_frame(start);
        assert_eq!(lifecycle.opacity(start), 0.0);
        assert_eq!(lifecycle.opacity(start + ms(300)), 1.0);
        assert_eq!(lifecycle.offset(start + ms(300)), 0.0);

        lifecycle.begin_exit(start + ms(500));
        assert_eq!(lifecycle.opacity(start + ms(500)), 1.0);
        assert_eq!(lifecycle.opacity(start + ms(800)), 0.0);
        assert_eq!(lifecycle.offset(start + ms(800)), SLIDE_DISTANCE);
    }

    #[test]
    fn zero_length_transition_is_instant() {
        let start = Instant::now();
        let timing = Timing {
            exit_grace: ms(500),
            transition: Duration::ZERO,
        };
        let mut lifecycle = Lifecycle::new(Duration::ZERO, timing);

        assert!(lifecycle.on_frame(start));
    }
}
