// SPDX-License-Identifier: MPL-2.0
//! Theme mode and color schemes.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Surface colors
    pub surface_primary: Color,
    pub surface_secondary: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,

    // Brand colors
    pub brand_primary: Color,

    // Semantic colors
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,

    // Overlay colors
    pub overlay_background: Color,
    pub overlay_text: Color,
}

impl ColorScheme {
    /// Light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,

            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,

            brand_primary: palette::PRIMARY_500,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_900,
            surface_secondary: Color::from_rgb(0.15, 0.15, 0.15),

            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,

            brand_primary: palette::PRIMARY_400,

            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            success: palette::SUCCESS_500,
            info: palette::INFO_500,

            overlay_background: Color {
                a: opacity::OVERLAY_PRESSED,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    /// Scheme matching the active Iced theme. Style functions receive the
    /// `Theme`, not the application's `ThemeMode`, so this is the bridge
    /// they use.
    #[must_use]
    pub fn for_theme(theme: &Theme) -> Self {
        if theme.extended_palette().is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // Default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    /// Flips between explicit light and dark; System resolves first.
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_dark() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    /// Maps the mode onto the Iced theme used at the application root.
    #[must_use]
    pub fn iced_theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        let scheme = ColorScheme::light();
        assert!(scheme.surface_primary.r > 0.9); // Close to white
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        let scheme = ColorScheme::dark();
        assert!(scheme.surface_primary.r < 0.2); // Close to black
    }

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // System mode depends on the host, just verify it doesn't panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn toggled_flips_explicit_modes() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn for_theme_follows_the_active_iced_theme() {
        assert_eq!(ColorScheme::for_theme(&Theme::Light), ColorScheme::light());
        assert_eq!(ColorScheme::for_theme(&Theme::Dark), ColorScheme::dark());
    }
}
