// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for cards and dropdowns.
///
/// Colors come from the [`ColorScheme`] matching the active theme, with a
/// slight opacity, so panels stay readable in both light and dark modes
/// without hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);
    let base = scheme.surface_secondary;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Card surface for feed posts and the composer.
pub fn card(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);

    container::Style {
        background: Some(Background::Color(scheme.surface_secondary)),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..scheme.text_secondary
            },
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Elevated dropdown surface for the search panel.
pub fn dropdown(theme: &Theme) -> container::Style {
    let style = panel(theme);

    container::Style {
        shadow: shadow::MD,
        ..style
    }
}
