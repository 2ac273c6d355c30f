// SPDX-License-Identifier: MPL-2.0
//! `iced_alerts` is a toast notification queue for Iced applications.
//!
//! The [`alerts`] engine keeps a bounded set of notifications on screen,
//! backs the overflow with a FIFO queue, and animates each item through its
//! enter, hold and exit phases. The [`app`] module hosts it in a small
//! bookstore desk that raises the kinds of notifications a back office does.

#![doc(html_root_url = "https://docs.rs/iced_alerts/0.1.0")]

pub mod alerts;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;
