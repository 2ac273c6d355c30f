// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! Callers build a [`Notification`] and hand it to a manager or sender. At
//! submission it is stamped with an id and a resolved hold duration, becoming
//! an immutable [`Request`].

use super::id::NotificationId;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Kind of notification; selects icon and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    /// Operation completed successfully (green check).
    Success,
    /// Operation failed or needs attention (red cross).
    Error,
    /// Neutral information (blue "i").
    #[default]
    Info,
}

impl Kind {
    /// Returns the accent color for this kind.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Kind::Success => palette::SUCCESS_500,
            Kind::Error => palette::ERROR_500,
            Kind::Info => palette::INFO_500,
        }
    }
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    /// Filled with the notification's accent color.
    Primary,
    /// Neutral gray button.
    #[default]
    Secondary,
}

type Callback = Arc<dyn Fn() + Send + Sync>;

/// A caller-supplied button attached to a notification.
///
/// Activating it runs the callback and then closes the notification,
/// regardless of the remaining hold time.
#[derive(Clone)]
pub struct Action {
    label: String,
    emphasis: Emphasis,
    callback: Callback,
}

impl Action {
    /// Creates a secondary action.
    pub fn new(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            emphasis: Emphasis::Secondary,
            callback: Arc::new(callback),
        }
    }

    /// Creates a primary action.
    pub fn primary(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self::new(label, callback).with_emphasis(Emphasis::Primary)
    }

    /// Creates a secondary action that only closes the notification.
    pub fn dismiss(label: impl Into<String>) -> Self {
        Self::new(label, || {})
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    pub(crate) fn activate(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("emphasis", &self.emphasis)
            .finish_non_exhaustive()
    }
}

/// A notification as built by a caller.
#[derive(Debug, Clone)]
pub struct Notification {
    kind: Kind,
    message: String,
    description: Option<String>,
    /// `None` defers to the manager's configured default.
    hold: Option<Duration>,
    actions: Vec<Action>,
}

impl Notification {
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            description: None,
            hold: None,
            actions: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Kind::Info, message)
    }

    /// Adds the secondary line shown under the message.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets how long the notification stays fully visible before exiting.
    #[must_use]
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    /// Appends an action button. Buttons render in insertion order.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

/// A submitted notification: stamped with its id and resolved hold time.
#[derive(Debug, Clone)]
pub struct Request {
    id: NotificationId,
    hold: Duration,
    notification: Notification,
}

impl Request {
    pub(crate) fn new(id: NotificationId, notification: Notification, default_hold: Duration) -> Self {
        let hold = notification.hold.unwrap_or(default_hold);
        Self {
            id,
            hold,
            notification,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Effective hold duration.
    #[must_use]
    pub fn hold(&self) -> Duration {
        self.hold
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }
}
