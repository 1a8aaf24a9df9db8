// SPDX-License-Identifier: MPL-2.0
//! Media handling: composer drafts and the avatar image cache.

pub mod avatars;
pub mod drafts;

pub use avatars::AvatarCache;
pub use drafts::{DraftManager, MediaDraft, PreviewRef};
