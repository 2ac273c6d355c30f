// SPDX-License-Identifier: MPL-2.0
//! Fire-and-forget submission handle.
//!
//! A [`Sender`] lets code that does not own the manager (background tasks,
//! action callbacks) raise notifications. Requests are stamped with their id
//! at send time and drained by the manager on its next tick.

use super::id::IdSource;
use super::notification::{Notification, Request};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Cloneable handle feeding a [`Manager`](super::Manager)'s inbox.
#[derive(Debug, Clone)]
pub struct Sender {
    tx: UnboundedSender<Request>,
    ids: Arc<IdSource>,
    default_hold: Duration,
}

impl Sender {
    pub(crate) fn new(tx: UnboundedSender<Request>, ids: Arc<IdSource>, default_hold: Duration) -> Self {
        Self {
            tx,
            ids,
            default_hold,
        }
    }

    /// Queues a notification. Never blocks and never fails from the caller's
    /// point of view; if the manager is gone the request is dropped.
    pub fn submit(&self, notification: Notification) {
        let request = Request::new(self.ids.next_id(), notification, self.default_hold);
        let id = request.id();
        if self.tx.send(request).is_err() {
            tracing::debug!(%id, "notification manager dropped, discarding request");
        }
    }
}
