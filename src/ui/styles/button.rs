// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use crate::ui::theming::ColorScheme;
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Style pour bouton primaire (action principale).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        _ => button::Style::default(),
    }
}

/// Style pour bouton désactivé (grayed out, non-interactif).
pub fn disabled() -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, _status: button::Status| button::Style {
        background: Some(Background::Color(palette::GRAY_200)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style pour bouton destructif (suppression).
pub fn destructive(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => palette::ERROR_500,
        _ => palette::GRAY_200,
    };
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => WHITE,
        _ => palette::ERROR_500,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: palette::ERROR_500,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style discret pour boutons d'action textuels (like, recherche).
pub fn text_action(theme: &Theme, status: button::Status) -> button::Style {
    let scheme = ColorScheme::for_theme(theme);
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => scheme.brand_primary,
        _ => scheme.text_primary,
    };

    button::Style {
        background: None,
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
