// SPDX-License-Identifier: MPL-2.0
//! Bookstore desk: an in-memory catalog that produces notification traffic.
//!
//! Each operation returns the notifications a real back office would raise
//! for it. Action callbacks cannot touch the desk directly (they run inside
//! the alert manager), so they post a [`Command`] on a channel that the host
//! drains every frame and feeds back into [`Desk::apply`].

use crate::alerts::{Action, Notification};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Hold used for short confirmations.
const CONFIRMATION_HOLD: Duration = Duration::from_secs(4);
/// Hold used for failures the user may want to act on.
const FAILURE_HOLD: Duration = Duration::from_secs(6);
/// Hold used for the delete confirmation prompt.
const PROMPT_HOLD: Duration = Duration::from_secs(15);
/// Hold used for load failures.
const LOAD_FAILURE_HOLD: Duration = Duration::from_secs(5);

/// Number of notifications raised by [`Desk::burst`].
pub const BURST_SIZE: usize = 12;

/// Commands posted by notification actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the catalog listing.
    ShowList,
    /// Clear the add-book form.
    ResetForm,
    /// Show the delete confirmation again.
    RequestDelete(u32),
    /// Carry out the delete.
    Delete(u32),
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub title: String,
}

/// Which panel of the desk is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Form,
    List,
}

/// Catalog state and the notification rules of each operation.
#[derive(Debug)]
pub struct Desk {
    books: Vec<Book>,
    next_id: u32,
    draft: String,
    online: bool,
    delete_attempts: u32,
    panel: Panel,
    commands: UnboundedSender<Command>,
}

impl Desk {
    /// Creates a desk seeded with a few books, plus the receiving end of its
    /// command channel.
    pub fn new() -> (Self, UnboundedReceiver<Command>) {
        let (commands, rx) = mpsc::unbounded_channel();
        let mut desk = Self {
            books: Vec::new(),
            next_id: 1,
            draft: String::new(),
            online: true,
            delete_attempts: 0,
            panel: Panel::default(),
            commands,
        };
        for title in ["The Left Hand of Darkness", "Dune", "A Wizard of Earthsea"] {
            desk.insert(title.to_string());
        }
        (desk, rx)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn show(&mut self, panel: Panel) {
        self.panel = panel;
    }

    fn insert(&mut self, title: String) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.books.push(Book { id, title });
        id
    }

    fn title_of(&self, id: u32) -> Option<&str> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .map(|book| book.title.as_str())
    }

    fn action(&self, label: &str, command: Command) -> Action {
        let commands = self.commands.clone();
        Action::new(label, move || send_command(&commands, &command))
    }

    fn primary_action(&self, label: &str, command: Command) -> Action {
        let commands = self.commands.clone();
        Action::primary(label, move || send_command(&commands, &command))
    }

    /// Adds the drafted title to the catalog.
    pub fn add_book(&mut self) -> Notification {
        let title = self.draft.trim().to_string();
        if title.is_empty() {
            return Notification::error("Validation Error")
                .with_description("Please fill in the book title.")
                .with_hold(CONFIRMATION_HOLD);
        }

        self.insert(title.clone());
        tracing::debug!(%title, "book created");

        Notification::success("Book Created")
            .with_description(format!("\"{title}\" has been successfully added to the library."))
            .with_hold(CONFIRMATION_HOLD)
            .with_action(self.primary_action("View List", Command::ShowList))
            .with_action(self.action("Add Another", Command::ResetForm))
    }

    /// Asks for confirmation before deleting a book.
    pub fn request_delete(&self, id: u32) -> Option<Notification> {
        let title = self.title_of(id)?;
        Some(
            Notification::error("Confirm Delete")
                .with_description(format!(
                    "Are you sure you want to delete \"{title}\"? This action cannot be undone."
                ))
                .with_hold(PROMPT_HOLD)
                .with_action(self.primary_action("Delete", Command::Delete(id)))
                .with_action(Action::dismiss("Cancel")),
        )
    }

    /// Deletes a book. Every other attempt fails, standing in for a flaky backend.
    pub fn delete(&mut self, id: u32) -> Option<Notification> {
        let title = self.title_of(id)?.to_string();
        self.delete_attempts += 1;

        if self.delete_attempts % 2 == 1 {
            tracing::debug!(id, attempt = self.delete_attempts, "simulated delete failure");
            return Some(
                Notification::error("Delete Failed")
                    .with_description("Unable to delete book. Please try again.")
                    .with_hold(FAILURE_HOLD)
                    .with_action(self.primary_action("Retry", Command::RequestDelete(id)))
                    .with_action(Action::dismiss("Dismiss")),
            );
        }

        self.books.retain(|book| book.id != id);
        Some(
            Notification::success("Book Deleted")
                .with_description(format!("\"{title}\" has been successfully deleted."))
                .with_hold(CONFIRMATION_HOLD),
        )
    }

    /// Reloads the catalog from the simulated backend.
    pub fn reload(&self) -> Notification {
        if self.online {
            Notification::info("Books Loaded")
                .with_description(format!("{} books in the catalog.", self.books.len()))
                .with_hold(CONFIRMATION_HOLD)
        } else {
            Notification::error("Error Loading Books")
                .with_description("Unable to load books. Please try again.")
                .with_hold(LOAD_FAILURE_HOLD)
        }
    }

    /// Raises more notifications than fit on screen at the default capacity.
    pub fn burst(&self) -> Vec<Notification> {
        (1..=BURST_SIZE)
            .map(|n| {
                Notification::info(format!("Notification {n}"))
                    .with_description(format!("Burst item {n} of {BURST_SIZE}."))
            })
            .collect()
    }

    /// Applies a command posted by a notification action.
    pub fn apply(&mut self, command: Command) -> Option<Notification> {
        match command {
            Command::ShowList => {
                self.panel = Panel::List;
                None
            }
            Command::ResetForm => {
                self.draft.clear();
                self.panel = Panel::Form;
                None
            }
            Command::RequestDelete(id) => self.request_delete(id),
            Command::Delete(id) => self.delete(id),
        }
    }
}

fn send_command(commands: &UnboundedSender<Command>, command: &Command) {
    if commands.send(command.clone()).is_err() {
        tracing::debug!(?command, "desk dropped, discarding command");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::Kind;

    #[test]
    fn empty_title_is_a_validation_error() {
        let (mut desk, _rx) = Desk::new();
        desk.set_draft("   ".to_string());
        let before = desk.books().len();

        let notification = desk.add_book();
        assert_eq!(notification.kind(), Kind::Error);
        assert_eq!(notification.message(), "Validation Error");
        assert_eq!(desk.books().len(), before);
    }

    #[test]
    fn add_book_offers_follow_up_actions() {
        let (mut desk, _rx) = Desk::new();
        desk.set_draft("Kindred".to_string());

        let notification = desk.add_book();
        assert_eq!(notification.kind(), Kind::Success);
        let labels: Vec<_> = notification.actions().iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["View List", "Add Another"]);
        assert!(desk.books().iter().any(|book| book.title == "Kindred"));
    }

    #[test]
    fn confirm_prompt_holds_fifteen_seconds() {
        let (desk, _rx) = Desk::new();
        let id = desk.books()[0].id;
        let prompt = desk.request_delete(id).expect("book exists");
        assert_eq!(prompt.message(), "Confirm Delete");
        assert_eq!(prompt.hold(), Some(Duration::from_secs(15)));
        assert_eq!(prompt.actions().len(), 2);
    }

    #[test]
    fn unknown_book_produces_nothing() {
        let (mut desk, _rx) = Desk::new();
        assert!(desk.request_delete(999).is_none());
        assert!(desk.delete(999).is_none());
    }

    #[test]
    fn delete_alternates_failure_and_success() {
        let (mut desk, _rx) = Desk::new();
        let id = desk.books()[0].id;

        let failed = desk.delete(id).expect("book exists");
        assert_eq!(failed.message(), "Delete Failed");
        assert!(desk.books().iter().any(|book| book.id == id));

        let deleted = desk.delete(id).expect("book exists");
        assert_eq!(deleted.message(), "Book Deleted");
        assert!(desk.books().iter().all(|book| book.id != id));
    }

    #[test]
    fn reload_reports_offline_backend() {
        let (mut desk, _rx) = Desk::new();
        assert_eq!(desk.reload().kind(), Kind::Info);

        desk.set_online(false);
        let notification = desk.reload();
        assert_eq!(notification.kind(), Kind::Error);
        assert_eq!(notification.message(), "Error Loading Books");
    }

    #[test]
    fn burst_exceeds_default_capacity() {
        let (desk, _rx) = Desk::new();
        assert!(desk.burst().len() > crate::config::DEFAULT_MAX_VISIBLE);
    }

    #[test]
    fn commands_update_panel_and_form() {
        let (mut desk, _rx) = Desk::new();
        desk.set_draft("draft".to_string());

        assert!(desk.apply(Command::ShowList).is_none());
        assert_eq!(desk.panel(), Panel::List);

        assert!(desk.apply(Command::ResetForm).is_none());
        assert_eq!(desk.panel(), Panel::Form);
        assert!(desk.draft().is_empty());
    }

    #[test]
    fn retry_action_posts_request_delete() {
        let (mut desk, mut rx) = Desk::new();
        let id = desk.books()[0].id;
        let failed = desk.delete(id).expect("book exists");

        let mut manager = crate::alerts::Manager::new();
        manager.attach();
        manager.submit(failed);
        let toast = manager.visible().next().expect("visible").id();
        assert!(manager.activate(toast, 0, std::time::Instant::now()));

        assert_eq!(rx.try_recv().ok(), Some(Command::RequestDelete(id)));
    }

    #[test]
    fn action_after_receiver_dropped_is_discarded() {
        let (desk, rx) = Desk::new();
        let id = desk.books()[0].id;
        let prompt = desk.request_delete(id).expect("book exists");
        drop(rx);

        let mut manager = crate::alerts::Manager::new();
        manager.attach();
        manager.submit(prompt);
        let toast = manager.visible().next().expect("visible").id();

        assert!(manager.activate(toast, 0, std::time::Instant::now()));
        assert_eq!(
            manager.phase(toast),
            Some(crate::alerts::Phase::Exiting)
        );
    }
}
