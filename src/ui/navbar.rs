// SPDX-License-Identifier: MPL-2.0
//! Top navigation bar: app title, directory search toggle, theme toggle,
//! and logout.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, container, tooltip, Row, Text};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SearchToggled,
    ThemeToggled,
    LogoutPressed,
}

pub fn view<'a>(i18n: &'a I18n, theme_mode: ThemeMode, search_open: bool) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("app-title")).size(typography::TITLE_MD);

    let search_label = if search_open { "✕" } else { "🔍" };
    let search = action_button(
        search_label,
        i18n.tr("navbar-search-tooltip"),
        Message::SearchToggled,
    );

    let theme_label = if theme_mode.is_dark() { "☀" } else { "☾" };
    let theme = action_button(
        theme_label,
        i18n.tr("navbar-theme-tooltip"),
        Message::ThemeToggled,
    );

    let logout = action_button(
        "⏻",
        i18n.tr("navbar-logout-tooltip"),
        Message::LogoutPressed,
    );

    let row = Row::new()
        .push(title)
        .push(iced::widget::space::horizontal())
        .push(search)
        .push(theme)
        .push(logout)
        .spacing(spacing::SM)
        .align_y(iced::Alignment::Center)
        .width(Length::Fill);

    container(row)
        .height(sizing::NAVBAR_HEIGHT)
        .padding([spacing::XS, spacing::MD])
        .style(styles::container::panel)
        .into()
}

fn action_button<'a>(
    label: &'a str,
    tip: String,
    message: Message,
) -> Element<'a, Message> {
    let btn = button(Text::new(label).size(typography::BODY_LG))
        .on_press(message)
        .style(styles::button::text_action)
        .padding(spacing::XS);

    tooltip(
        btn,
        container(Text::new(tip).size(typography::CAPTION))
            .padding(spacing::XXS)
            .style(styles::container::panel),
        tooltip::Position::Bottom,
    )
    .into()
}
