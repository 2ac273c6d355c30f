// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue with animated per-item lifecycles.
//!
//! Uncoordinated callers (form handlers, failed requests, confirmation
//! prompts) submit notifications without knowing about each other or the
//! display capacity. The manager keeps at most `max_visible` of them on
//! screen, holds the rest in a FIFO backlog, and walks each visible one
//! through `Entering -> Held -> Exiting -> Disposed`.
//!
//! # Components
//!
//! - [`notification`] - `Notification` builder, `Kind`, `Action`
//! - [`manager`] - `Manager` owning queue state and lifecycles
//! - [`lifecycle`] - per-item state machine and transition curves
//! - [`queue`] - bounded visible set and waiting backlog
//! - [`sender`] - cloneable submission handle
//! - [`toast`] - Iced rendering of the visible set
//!
//! # Usage
//!
//! ```
//! use iced_alerts::alerts::{Action, Manager, Notification};
//! use std::time::{Duration, Instant};
//!
//! let mut manager = Manager::new();
//! // Submissions before the host attaches are buffered.
//! manager.submit(Notification::success("Book Created").with_hold(Duration::from_secs(4)));
//! manager.attach();
//!
//! manager.submit(
//!     Notification::error("Delete Failed")
//!         .with_description("Unable to delete book. Please try again.")
//!         .with_action(Action::primary("Retry", || {}))
//!         .with_action(Action::dismiss("Dismiss")),
//! );
//!
//! // Each paint frame advances the lifecycles.
//! manager.tick(Instant::now());
//! assert_eq!(manager.visible_count(), 2);
//! ```

pub mod id;
pub mod lifecycle;
pub mod manager;
pub mod notification;
pub mod queue;
pub mod sender;
mod timer;
pub mod toast;

pub use id::NotificationId;
pub use lifecycle::{Phase, Timing};
pub use manager::{Manager, Message, Settings};
pub use notification::{Action, Emphasis, Kind, Notification, Request};
pub use queue::{Capacity, Slot};
pub use sender::Sender;
pub use toast::Toast;
