// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the desk and the alerts.
//!
//! The `App` struct wires the bookstore desk to the alert manager: desk
//! operations submit notifications, notification actions post desk commands,
//! and paint frames attach the manager and advance every toast's lifecycle.

pub mod desk;
mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::alerts::{self, Notification};
use crate::config;
use desk::{Command, Desk};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;

/// Root Iced application state.
pub struct App {
    desk: Desk,
    /// Commands posted by notification action callbacks.
    commands: UnboundedReceiver<Command>,
    alerts: alerts::Manager,
    /// Instant of the latest frame, used to sample transitions in `view`.
    now: Instant,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("books", &self.desk.books().len())
            .field("visible", &self.alerts.visible_count())
            .field("waiting", &self.alerts.waiting_count())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone());

    // iced 0.14 requires a `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the persisted config.
    ///
    /// A config warning is submitted before the overlay attaches; it is
    /// buffered and shown on the first frame.
    fn new(_flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (desk, commands) = Desk::new();

        let mut app = App {
            desk,
            commands,
            alerts: alerts::Manager::with_settings(alerts::Settings::from_config(&config.alerts)),
            now: Instant::now(),
        };

        if let Some(key) = config_warning {
            tracing::warn!(%key, "using default settings");
            app.alerts.submit(
                Notification::error("Settings Not Loaded")
                    .with_description("The settings file could not be read. Defaults are in use."),
            );
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.alerts.waiting_count() {
            0 => "Bookstore Desk".to_string(),
            waiting => format!("Bookstore Desk ({waiting} waiting)"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Frames are needed to attach the manager and while anything is on screen.
    fn needs_frames(&self) -> bool {
        !self.alerts.is_attached() || self.alerts.has_notifications()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_frame_subscription(self.needs_frames())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Frame(now) => {
                self.now = now;
                if self.alerts.attach() {
                    tracing::debug!("toast overlay attached");
                }
                self.drain_commands();
                self.alerts.tick(now);
            }
            Message::Alerts(message) => {
                let now = Instant::now();
                self.now = now;
                self.alerts.handle_message(&message, now);
                self.drain_commands();
            }
            Message::DraftChanged(draft) => self.desk.set_draft(draft),
            Message::AddBook => {
                let notification = self.desk.add_book();
                self.alerts.submit(notification);
            }
            Message::DeleteBook(id) => {
                if let Some(notification) = self.desk.request_delete(id) {
                    self.alerts.submit(notification);
                }
            }
            Message::Reload => {
                let notification = self.desk.reload();
                self.alerts.submit(notification);
            }
            Message::SetOnline(online) => self.desk.set_online(online),
            Message::Burst => {
                for notification in self.desk.burst() {
                    self.alerts.submit(notification);
                }
            }
            Message::ShowPanel(panel) => self.desk.show(panel),
        }
        Task::none()
    }

    /// Applies commands posted by action callbacks since the last drain.
    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            tracing::debug!(?command, "desk command");
            if let Some(notification) = self.desk.apply(command) {
                self.alerts.submit(notification);
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            desk: &self.desk,
            alerts: &self.alerts,
            now: self.now,
        })
    }
}
