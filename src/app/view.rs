// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The desk panels fill the window; the toast overlay is stacked on top.

use super::desk::{Desk, Panel};
use super::Message;
use crate::alerts::{Manager, Toast};
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{
    button, scrollable, text_input, toggler, Column, Container, Row, Space, Stack, Text,
};
use iced::{Alignment, Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub desk: &'a Desk,
    pub alerts: &'a Manager,
    pub now: Instant,
}

/// Renders the desk with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let panel = match ctx.desk.panel() {
        Panel::Form => view_form(ctx.desk),
        Panel::List => view_list(ctx.desk),
    };

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::XL)
        .push(view_header(ctx.desk))
        .push(panel)
        .push(view_status(ctx.alerts));

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(Toast::view_overlay(ctx.alerts, ctx.now).map(Message::Alerts))
        .into()
}

fn view_header(desk: &Desk) -> Element<'_, Message> {
    let tab = |label: &'static str, panel: Panel| {
        button(Text::new(label).size(typography::BODY))
            .on_press(Message::ShowPanel(panel))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(if desk.panel() == panel {
                button::primary
            } else {
                button::secondary
            })
    };

    Row::new()
        .spacing(spacing::SM)
        .align_y(Alignment::Center)
        .push(Text::new("Bookstore Desk").size(typography::TITLE_LG))
        .push(Space::new().width(Length::Fill))
        .push(tab("Add Book", Panel::Form))
        .push(tab("Manage Books", Panel::List))
        .into()
}

fn view_form(desk: &Desk) -> Element<'_, Message> {
    let input = text_input("Title", desk.draft())
        .on_input(Message::DraftChanged)
        .on_submit(Message::AddBook)
        .size(typography::BODY_LG)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH));

    let submit = button(Text::new("Add Book").size(typography::BODY))
        .on_press(Message::AddBook)
        .height(Length::Fixed(sizing::INPUT_HEIGHT))
        .style(button::primary);

    Column::new()
        .spacing(spacing::MD)
        .push(Text::new("Add a Book").size(typography::TITLE_MD))
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Alignment::Center)
                .push(input)
                .push(submit),
        )
        .into()
}

fn view_list(desk: &Desk) -> Element<'_, Message> {
    let rows = desk.books().iter().fold(
        Column::new().spacing(spacing::XS),
        |column, book| {
            column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(Alignment::Center)
                    .push(
                        Text::new(book.title.as_str())
                            .size(typography::BODY)
                            .width(Length::Fill),
                    )
                    .push(
                        button(Text::new("Delete").size(typography::BODY_SM))
                            .on_press(Message::DeleteBook(book.id))
                            .style(button::danger),
                    ),
            )
        },
    );

    let controls = Row::new()
        .spacing(spacing::MD)
        .align_y(Alignment::Center)
        .push(
            button(Text::new("Reload").size(typography::BODY))
                .on_press(Message::Reload)
                .style(button::secondary),
        )
        .push(
            button(Text::new("Burst").size(typography::BODY))
                .on_press(Message::Burst)
                .style(button::secondary),
        )
        .push(Text::new("Backend online").size(typography::BODY))
        .push(toggler(desk.is_online()).on_toggle(Message::SetOnline));

    Column::new()
        .spacing(spacing::MD)
        .push(Text::new("Manage Books").size(typography::TITLE_MD))
        .push(controls)
        .push(scrollable(rows).height(Length::Fill))
        .into()
}

fn view_status(alerts: &Manager) -> Element<'_, Message> {
    Text::new(format!(
        "{} visible, {} waiting",
        alerts.visible_count(),
        alerts.waiting_count()
    ))
    .size(typography::CAPTION)
    .into()
}
