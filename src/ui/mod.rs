// SPDX-License-Identifier: MPL-2.0
//! User interface components and visual foundations.

pub mod composer;
pub mod design_tokens;
pub mod navbar;
pub mod notifications;
pub mod post_card;
pub mod search;
pub mod styles;
pub mod theming;
