// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::desk::Panel;
use crate::alerts;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Forwarded from the toast overlay.
    Alerts(alerts::Message),
    /// A paint frame; drives attach, command draining and lifecycles.
    Frame(Instant),
    DraftChanged(String),
    AddBook,
    DeleteBook(u32),
    Reload,
    SetOnline(bool),
    Burst,
    ShowPanel(Panel),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_ALERTS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
