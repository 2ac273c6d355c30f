// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering visible notifications.
//!
//! Toasts are small cards with a kind-colored accent, an icon, the message,
//! an optional description, optional action buttons and a close control.
//! Opacity and vertical offset follow each item's lifecycle transition.

use super::id::NotificationId;
use super::manager::{Manager, Message};
use super::notification::{Action, Emphasis, Kind};
use super::queue::Slot;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::svg::{self, Handle, Svg};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Padding, Shadow, Theme};
use std::sync::OnceLock;
use std::time::Instant;

const CHECK_CIRCLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="m9 12 2 2 4-4"/></svg>"#;
const X_CIRCLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="m15 9-6 6"/><path d="m9 9 6 6"/></svg>"#;
const INFO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/></svg>"#;
const CLOSE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M18 6 6 18"/><path d="m6 6 12 12"/></svg>"#;

macro_rules! define_icon {
    ($name:ident, $source:expr) => {
        fn $name() -> Handle {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            HANDLE
                .get_or_init(|| Handle::from_memory($source.as_bytes()))
                .clone()
        }
    };
}

define_icon!(check_circle_icon, CHECK_CIRCLE);
define_icon!(x_circle_icon, X_CIRCLE);
define_icon!(info_icon, INFO);
define_icon!(close_icon, CLOSE);

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast at the given frame instant.
    pub fn view(slot: &Slot, now: Instant) -> Element<'_, Message> {
        let request = slot.request();
        let notification = request.notification();
        let id = request.id();
        let kind = notification.kind();
        let accent = kind.color();
        let alpha = slot.lifecycle().opacity(now);

        let icon = Svg::new(Self::kind_icon(kind))
            .width(Length::Fixed(sizing::ICON_MD))
            .height(Length::Fixed(sizing::ICON_MD))
            .style(move |_theme: &Theme, _status| svg::Style {
                color: Some(faded(accent, alpha)),
            });

        let mut body = Column::new().spacing(spacing::XXS).width(Length::Fill).push(
            Text::new(notification.message())
                .size(typography::BODY_LG)
                .style(move |theme: &Theme| text::Style {
                    color: Some(faded(theme.palette().text, alpha)),
                }),
        );

        if let Some(description) = notification.description() {
            body = body.push(
                Text::new(description)
                    .size(typography::BODY_SM)
                    .style(move |_theme: &Theme| text::Style {
                        color: Some(faded(palette::GRAY_400, alpha)),
                    }),
            );
        }

        if !notification.actions().is_empty() {
            let actions = notification.actions().iter().enumerate().fold(
                Row::new().spacing(spacing::XS).padding(Padding {
                    top: spacing::XS,
                    right: 0.0,
                    bottom: 0.0,
                    left: 0.0,
                }),
                |row, (index, action)| row.push(action_button(action, id, index, accent, alpha)),
            );
            body = body.push(actions);
        }

        let close = button(
            Svg::new(close_icon())
                .width(Length::Fixed(sizing::ICON_SM))
                .height(Length::Fixed(sizing::ICON_SM))
                .style(move |_theme: &Theme, _status| svg::Style {
                    color: Some(faded(palette::GRAY_400, alpha)),
                }),
        )
        .on_press(Message::Close(id))
        .padding(spacing::XXS)
        .style(move |theme: &Theme, status| close_button_style(theme, status, alpha));

        // Layout: [icon] [message / description / actions] [close]
        let content = Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Top)
            .push(icon)
            .push(body)
            .push(close);

        let card = Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::MD)
            .style(move |theme: &Theme| toast_container_style(theme, accent, alpha));

        Container::new(card)
            .padding(Padding {
                top: slot.lifecycle().offset(now),
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            })
            .into()
    }

    /// Renders every visible notification, stacked top-right in arrival order.
    pub fn view_overlay(manager: &Manager, now: Instant) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> =
            manager.visible().map(|slot| Self::view(slot, now)).collect();

        if toasts.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let stack = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Top)
            .padding(spacing::MD)
            .into()
    }

    fn kind_icon(kind: Kind) -> Handle {
        match kind {
            Kind::Success => check_circle_icon(),
            Kind::Error => x_circle_icon(),
            Kind::Info => info_icon(),
        }
    }
}

fn action_button<'a>(
    action: &'a Action,
    id: NotificationId,
    index: usize,
    accent: Color,
    alpha: f32,
) -> Element<'a, Message> {
    let emphasis = action.emphasis();
    button(Text::new(action.label()).size(typography::BODY_SM))
        .on_press(Message::Activate { id, index })
        .padding([spacing::XXS, spacing::SM])
        .style(move |_theme: &Theme, status| action_button_style(emphasis, accent, status, alpha))
        .into()
}

/// Multiplies a color's alpha by the transition opacity.
fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Style function for the toast card.
fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(faded(bg_color, alpha))),
        border: Border {
            color: faded(accent, alpha),
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        shadow: Shadow {
            color: faded(Color { a: opacity::OVERLAY_SUBTLE, ..palette::BLACK }, alpha),
            ..shadow::LG
        },
        text_color: Some(faded(theme.palette().text, alpha)),
        ..Default::default()
    }
}

fn action_button_style(
    emphasis: Emphasis,
    accent: Color,
    status: button::Status,
    alpha: f32,
) -> button::Style {
    let (background, text_color) = match emphasis {
        Emphasis::Primary => (accent, palette::WHITE),
        Emphasis::Secondary => (palette::GRAY_100, palette::GRAY_700),
    };
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Color {
            a: opacity::OVERLAY_PRESSED,
            ..background
        },
        button::Status::Active | button::Status::Disabled => background,
    };

    button::Style {
        background: Some(Background::Color(faded(background, alpha))),
        text_color: faded(text_color, alpha),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn close_button_style(theme: &Theme, status: button::Status, alpha: f32) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered => Some(Background::Color(faded(
            Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            },
            alpha,
        ))),
        button::Status::Pressed => Some(Background::Color(faded(
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::GRAY_400
            },
            alpha,
        ))),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: faded(base.text, alpha),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
