// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Localization uses the Fluent system: translation files are embedded
//! from `assets/i18n/`, the locale is resolved from CLI, config, or the
//! OS, and lookups fall back to `en-US`.

pub mod fluent;
