// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the queue state. It starts detached, buffering every
//! submission until its visual host calls [`Manager::attach`]; from then on
//! requests are admitted directly and frame ticks drive each visible item's
//! lifecycle through to disposal.

use super::id::{IdSource, NotificationId};
use super::lifecycle::{Phase, Timing};
use super::notification::{Notification, Request};
use super::queue::{Capacity, Queue, Slot};
use super::sender::Sender;
use crate::config::{AlertsConfig, DEFAULT_HOLD_MS};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

/// Messages produced by the toast overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The close control of a notification was pressed.
    Close(NotificationId),
    /// An action button was pressed (`index` into the notification's actions).
    Activate { id: NotificationId, index: usize },
    /// A renderer reports that a notification's exit transition finished.
    TransitionEnd(NotificationId),
}

/// Tunables for a manager instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub capacity: Capacity,
    /// Hold used for notifications that do not set their own.
    pub default_hold: Duration,
    pub timing: Timing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: Capacity::default(),
            default_hold: Duration::from_millis(DEFAULT_HOLD_MS),
            timing: Timing::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &AlertsConfig) -> Self {
        Self {
            capacity: Capacity::new(config.max_visible()),
            default_hold: config.default_hold(),
            timing: Timing {
                exit_grace: config.exit_grace(),
                transition: config.transition(),
            },
        }
    }
}

#[derive(Debug)]
enum State {
    /// Host not attached yet; requests wait in creation order.
    Unattached { pending: Vec<Request> },
    Attached(Queue),
}

/// Owns the visible set, the waiting backlog, and every item's lifecycle.
#[derive(Debug)]
pub struct Manager {
    state: State,
    settings: Settings,
    ids: Arc<IdSource>,
    inbox: UnboundedReceiver<Request>,
    outbox: UnboundedSender<Request>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl Manager {
    /// Creates a detached manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        let (outbox, inbox) = unbounded_channel();
        Self {
            state: State::Unattached {
                pending: Vec::new(),
            },
            settings,
            ids: Arc::new(IdSource::new()),
            inbox,
            outbox,
        }
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Returns a handle other parts of the application can submit through.
    #[must_use]
    pub fn sender(&self) -> Sender {
        Sender::new(
            self.outbox.clone(),
            Arc::clone(&self.ids),
            self.settings.default_hold,
        )
    }

    /// Submits a notification. Fire-and-forget: never fails, never blocks.
    pub fn submit(&mut self, notification: Notification) {
        // Sender requests already hold earlier ids; they go first.
        self.drain_inbox();
        let request = Request::new(self.ids.next_id(), notification, self.settings.default_hold);
        self.enqueue(request);
    }

    fn enqueue(&mut self, request: Request) {
        let id = request.id();
        match &mut self.state {
            State::Unattached { pending } => {
                pending.push(request);
                debug!(%id, pending = pending.len(), "notification buffered until host attaches");
            }
            State::Attached(queue) => {
                let admission = queue.admit(request);
                debug!(
                    %id,
                    ?admission,
                    visible = queue.visible_len(),
                    waiting = queue.waiting_len(),
                    "notification admitted"
                );
            }
        }
    }

    /// Attaches the visual host and flushes buffered requests in creation
    /// order under the normal admission rule.
    ///
    /// Returns `false` if the manager was already attached.
    pub fn attach(&mut self) -> bool {
        if self.is_attached() {
            return false;
        }
        self.drain_inbox();

        let pending = match &mut self.state {
            State::Unattached { pending } => std::mem::take(pending),
            State::Attached(_) => return false,
        };

        let mut queue = Queue::new(self.settings.capacity, self.settings.timing);
        let flushed = pending.len();
        for request in pending {
            queue.admit(request);
        }
        self.state = State::Attached(queue);
        debug!(flushed, "notification host attached");
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self.state, State::Attached(_))
    }

    fn drain_inbox(&mut self) {
        while let Ok(request) = self.inbox.try_recv() {
            self.enqueue(request);
        }
    }

    /// Advances every visible lifecycle to `now` (one paint frame).
    ///
    /// Items that reach disposal are released, promoting waiting ones; the
    /// promoted items enter on the following frame.
    pub fn tick(&mut self, now: Instant) {
        self.drain_inbox();

        let State::Attached(queue) = &mut self.state else {
            return;
        };

        let disposed: Vec<NotificationId> = queue
            .visible_mut()
            .filter_map(|slot| slot.lifecycle_mut().on_frame(now).then(|| slot.id()))
            .collect();

        for id in disposed {
            self.release(id);
        }
    }

    /// Handles a message from the toast overlay.
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Close(id) => {
                self.close(*id, now);
            }
            Message::Activate { id, index } => {
                self.activate(*id, *index, now);
            }
            Message::TransitionEnd(id) => {
                self.transition_end(*id);
            }
        }
    }

    /// Starts the exit of a visible notification.
    ///
    /// Returns `false` if it is unknown or already leaving.
    pub fn close(&mut self, id: NotificationId, now: Instant) -> bool {
        self.slot_mut(id)
            .is_some_and(|slot| slot.lifecycle_mut().begin_exit(now))
    }

    /// Runs an action's callback, then starts the notification's exit.
    ///
    /// Items already past `Held` ignore activation, so a callback runs at most
    /// once per notification.
    pub fn activate(&mut self, id: NotificationId, index: usize, now: Instant) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if matches!(slot.lifecycle().phase(), Phase::Exiting | Phase::Disposed) {
            return false;
        }
        let Some(action) = slot.request().notification().actions().get(index).cloned() else {
            return false;
        };

        debug!(%id, label = action.label(), "notification action activated");
        action.activate();
        slot.lifecycle_mut().begin_exit(now)
    }

    /// Handles an exit-transition-finished signal.
    pub fn transition_end(&mut self, id: NotificationId) -> bool {
        let disposed = self
            .slot_mut(id)
            .is_some_and(|slot| slot.lifecycle_mut().on_transition_end());
        if disposed {
            self.release(id);
        } else {
            trace!(%id, "transition end ignored");
        }
        disposed
    }

    /// Removes a disposed notification and promotes the oldest waiting one.
    ///
    /// Idempotent: releasing an id that is no longer visible is a no-op.
    pub(crate) fn release(&mut self, id: NotificationId) -> bool {
        let State::Attached(queue) = &mut self.state else {
            return false;
        };
        match queue.release(id) {
            Some(release) => {
                debug!(
                    %id,
                    promoted = ?release.promoted,
                    visible = queue.visible_len(),
                    waiting = queue.waiting_len(),
                    "notification disposed"
                );
                true
            }
            None => {
                trace!(%id, "duplicate release ignored");
                false
            }
        }
    }

    fn slot_mut(&mut self, id: NotificationId) -> Option<&mut Slot> {
        match &mut self.state {
            State::Attached(queue) => queue.slot_mut(id),
            State::Unattached { .. } => None,
        }
    }

    fn queue(&self) -> Option<&Queue> {
        match &self.state {
            State::Attached(queue) => Some(queue),
            State::Unattached { .. } => None,
        }
    }

    /// Returns the visible notifications in arrival order.
    pub fn visible(&self) -> impl Iterator<Item = &Slot> {
        self.queue().into_iter().flat_map(Queue::visible)
    }

    /// Returns the waiting notifications, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = &Request> {
        self.queue().into_iter().flat_map(Queue::waiting)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.queue().map_or(0, Queue::visible_len)
    }

    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.queue().map_or(0, Queue::waiting_len)
    }

    /// Number of requests buffered while detached.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        match &self.state {
            State::Unattached { pending } => pending.len(),
            State::Attached(_) => 0,
        }
    }

    /// Returns whether any notification is buffered, waiting, or visible,
    /// including `Sender` requests not drained yet.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.inbox.is_empty()
            || match &self.state {
                State::Unattached { pending } => !pending.is_empty(),
                State::Attached(queue) => !queue.is_empty(),
            }
    }

    /// Returns the lifecycle phase of a visible notification.
    #[must_use]
    pub fn phase(&self, id: NotificationId) -> Option<Phase> {
        self.visible()
            .find(|slot| slot.id() == id)
            .map(|slot| slot.lifecycle().phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::notification::Action;
    use crate::config::DEFAULT_MAX_VISIBLE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn attached() -> Manager {
        let mut manager = Manager::new();
        manager.attach();
        manager
    }

    fn ids(manager: &Manager) -> Vec<NotificationId> {
        manager.visible().map(Slot::id).collect()
    }

    fn fill(manager: &mut Manager, count: usize) {
        for i in 0..count {
            manager.submit(Notification::info(format!("item-{i}")));
        }
    }

    #[test]
    fn new_manager_is_detached_and_empty() {
        let manager = Manager::new();
        assert!(!manager.is_attached());
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(manager.waiting_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn submissions_before_attach_are_buffered_then_flushed() {
        let mut manager = Manager::new();
        fill(&mut manager, DEFAULT_MAX_VISIBLE + 2);

        assert_eq!(manager.pending_count(), DEFAULT_MAX_VISIBLE + 2);
        assert_eq!(manager.visible_count(), 0);
        assert!(manager.has_notifications());

        assert!(manager.attach());
        assert_eq!(manager.pending_count(), 0);
        assert_eq!(manager.visible_count(), DEFAULT_MAX_VISIBLE);
        assert_eq!(manager.waiting_count(), 2);

        let first = manager.visible().next().expect("visible item");
        assert_eq!(first.request().notification().message(), "item-0");
    }

    #[test]
    fn attach_happens_once() {
        let mut manager = Manager::new();
        assert!(manager.attach());
        manager.submit(Notification::info("live"));
        assert!(!manager.attach());
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn sender_requests_are_drained_on_tick() {
        let mut manager = attached();
        let sender = manager.sender();

        sender.submit(Notification::success("from a task"));
        assert_eq!(manager.visible_count(), 0);

        manager.tick(Instant::now());
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn sender_requests_before_attach_join_the_buffer() {
        let mut manager = Manager::new();
        manager.submit(Notification::info("direct"));
        manager.sender().submit(Notification::info("sent"));

        manager.attach();

        let messages: Vec<_> = manager
            .visible()
            .map(|slot| slot.request().notification().message().to_string())
            .collect();
        assert_eq!(messages, ["direct", "sent"]);
    }

    fn messages(manager: &Manager) -> Vec<String> {
        manager
            .visible()
            .map(|slot| slot.request().notification().message().to_string())
            .collect()
    }

    #[test]
    fn earlier_sender_request_precedes_direct_submit_before_attach() {
        let mut manager = Manager::new();
        manager.sender().submit(Notification::info("first-created"));
        manager.submit(Notification::info("second-created"));
        assert_eq!(manager.pending_count(), 2);

        manager.attach();
        assert_eq!(messages(&manager), ["first-created", "second-created"]);
    }

    #[test]
    fn earlier_sender_request_precedes_direct_submit_after_attach() {
        let mut manager = attached();
        manager.sender().submit(Notification::info("first-created"));
        manager.submit(Notification::info("second-created"));
        manager.tick(Instant::now());

        assert_eq!(messages(&manager), ["first-created", "second-created"]);
        let ids = ids(&manager);
        assert!(ids[0] < ids[1]);
    }

    #[test]
    fn undrained_sender_request_counts_as_a_notification() {
        let mut manager = attached();
        assert!(!manager.has_notifications());

        manager.sender().submit(Notification::info("from task"));
        assert!(manager.has_notifications());
        assert_eq!(manager.visible_count(), 0);

        manager.tick(Instant::now());
        assert_eq!(manager.visible_count(), 1);
        assert!(manager.has_notifications());
    }

    #[test]
    fn sender_request_keeps_a_detached_manager_busy() {
        let manager = Manager::new();
        manager.sender().submit(Notification::info("early"));
        assert!(manager.has_notifications());
    }

    #[test]
    fn release_is_idempotent() {
        let mut manager = attached();
        fill(&mut manager, DEFAULT_MAX_VISIBLE + 2);
        let visible = ids(&manager);

        assert!(manager.release(visible[0]));
        assert!(!manager.release(visible[0]));

        assert_eq!(manager.visible_count(), DEFAULT_MAX_VISIBLE);
        assert_eq!(manager.waiting_count(), 1);
        assert_eq!(&ids(&manager)[..DEFAULT_MAX_VISIBLE - 1], &visible[1..]);
    }

    #[test]
    fn first_frame_enters_held() {
        let mut manager = attached();
        manager.submit(Notification::info("hello"));
        let id = ids(&manager)[0];
        assert_eq!(manager.phase(id), Some(Phase::Entering));

        manager.tick(Instant::now());
        assert_eq!(manager.phase(id), Some(Phase::Held));
    }

    #[test]
    fn close_starts_exit_once() {
        let start = Instant::now();
        let mut manager = attached();
        manager.submit(Notification::info("closable"));
        let id = ids(&manager)[0];
        manager.tick(start);

        assert!(manager.close(id, start));
        assert!(!manager.close(id, start));
        assert_eq!(manager.phase(id), Some(Phase::Exiting));
    }

    #[test]
    fn transition_end_disposes_and_repeats_are_ignored() {
        let start = Instant::now();
        let mut manager = attached();
        manager.submit(Notification::info("bye"));
        let id = ids(&manager)[0];
        manager.tick(start);
        manager.close(id, start);

        assert!(manager.transition_end(id));
        assert!(!manager.transition_end(id));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn activation_after_exit_does_not_rerun_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let start = Instant::now();
        let mut manager = attached();
        manager.submit(Notification::info("once").with_action(Action::new("Go", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })));
        let id = ids(&manager)[0];
        manager.tick(start);

        assert!(manager.activate(id, 0, start));
        assert!(!manager.activate(id, 0, start + ms(10)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_action_index_is_ignored() {
        let start = Instant::now();
        let mut manager = attached();
        manager.submit(Notification::info("no actions"));
        let id = ids(&manager)[0];
        manager.tick(start);

        assert!(!manager.activate(id, 3, start));
        assert_eq!(manager.phase(id), Some(Phase::Held));
    }

    #[test]
    fn handle_message_routes_close() {
        let start = Instant::now();
        let mut manager = attached();
        manager.submit(Notification::info("routed"));
        let id = ids(&manager)[0];
        manager.tick(start);

        manager.handle_message(&Message::Close(id), start);
        assert_eq!(manager.phase(id), Some(Phase::Exiting));

        manager.handle_message(&Message::TransitionEnd(id), start + ms(300));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn settings_from_config_apply_to_queue() {
        let config = AlertsConfig {
            max_visible: Some(2),
            default_hold_ms: Some(1_000),
            ..AlertsConfig::default()
        };
        let mut manager = Manager::with_settings(Settings::from_config(&config));
        manager.attach();
        fill(&mut manager, 3);

        assert_eq!(manager.visible_count(), 2);
        assert_eq!(manager.waiting_count(), 1);
        let hold = manager.visible().next().map(|slot| slot.request().hold());
        assert_eq!(hold, Some(ms(1_000)));
    }
}
