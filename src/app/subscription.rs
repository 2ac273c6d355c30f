// SPDX-License-Identifier: MPL-2.0
//! Frame subscription for the application.

use super::Message;
use iced::{window, Subscription};

/// Subscribes to paint frames while the alert manager has work to do.
///
/// A detached manager needs one frame to attach; afterwards frames are only
/// requested while notifications are visible or waiting, so an idle desk
/// does not redraw.
pub fn create_frame_subscription(needs_frames: bool) -> Subscription<Message> {
    if needs_frames {
        window::frames().map(Message::Frame)
    } else {
        Subscription::none()
    }
}
