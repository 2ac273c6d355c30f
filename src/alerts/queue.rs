// SPDX-License-Identifier: MPL-2.0
//! Bounded visible set with a FIFO waiting backlog.
//!
//! Every method takes `&mut self` and leaves the queue consistent on return:
//! the visible set never exceeds capacity, and whenever the backlog is
//! non-empty the visible set is full.

use super::id::NotificationId;
use super::lifecycle::{Lifecycle, Timing};
use super::notification::Request;
use crate::config::{DEFAULT_MAX_VISIBLE, MAX_MAX_VISIBLE, MIN_MAX_VISIBLE};
use std::collections::VecDeque;

/// Maximum number of simultaneously visible notifications.
///
/// Values outside the supported range are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_MAX_VISIBLE)
    }
}

/// A visible notification together with its lifecycle.
#[derive(Debug)]
pub struct Slot {
    request: Request,
    lifecycle: Lifecycle,
}

impl Slot {
    fn new(request: Request, timing: Timing) -> Self {
        let lifecycle = Lifecycle::new(request.hold(), timing);
        Self { request, lifecycle }
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub(crate) fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.request.id()
    }
}

/// Where an admitted request landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Visible,
    Waiting,
}

/// Outcome of releasing a visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    /// The waiting notification that took the freed slot, if any.
    pub promoted: Option<NotificationId>,
}

#[derive(Debug)]
pub struct Queue {
    visible: Vec<Slot>,
    waiting: VecDeque<Request>,
    capacity: Capacity,
    timing: Timing,
}

impl Queue {
    #[must_use]
    pub fn new(capacity: Capacity, timing: Timing) -> Self {
        Self {
            visible: Vec::with_capacity(capacity.value()),
            waiting: VecDeque::new(),
            capacity,
            timing,
        }
    }

    /// Appends to the visible set if a slot is free, otherwise to the backlog.
    pub fn admit(&mut self, request: Request) -> Admission {
        if self.visible.len() < self.capacity.value() {
            self.visible.push(Slot::new(request, self.timing));
            Admission::Visible
        } else {
            self.waiting.push_back(request);
            Admission::Waiting
        }
    }

    /// Removes a visible notification and promotes the oldest waiting one.
    ///
    /// Returns `None` if `id` is not visible, in which case nothing changes.
    pub fn release(&mut self, id: NotificationId) -> Option<Release> {
        let position = self.visible.iter().position(|slot| slot.id() == id)?;
        self.visible.remove(position);

        let promoted = if self.visible.len() < self.capacity.value() {
            self.waiting.pop_front().map(|request| {
                let promoted_id = request.id();
                self.visible.push(Slot::new(request, self.timing));
                promoted_id
            })
        } else {
            None
        };

        Some(Release { promoted })
    }

    /// Visible notifications in arrival order.
    pub fn visible(&self) -> impl Iterator<Item = &Slot> {
        self.visible.iter()
    }

    pub(crate) fn visible_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.visible.iter_mut()
    }

    pub(crate) fn slot_mut(&mut self, id: NotificationId) -> Option<&mut Slot> {
        self.visible.iter_mut().find(|slot| slot.id() == id)
    }

    /// Waiting notifications, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = &Request> {
        self.waiting.iter()
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.waiting.is_empty()
    }
}
