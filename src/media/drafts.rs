// SPDX-License-Identifier: MPL-2.0
//! Ephemeral media drafts: user-selected files plus previewable handles.
//!
//! A [`PreviewRef`] is a manually managed resource. It is acquired when a
//! file is selected and must be released exactly once: on removal from the
//! draft list, on `clear()` after a successful submission, or on explicit
//! cancellation. `Drop` acts as a backstop so no exit path can leak a
//! preview, but the protocol is the explicit release.

use crate::domain::MediaKind;
use crate::error::{Error, Result};
use iced::widget::image;
use std::path::{Path, PathBuf};

/// Revocable handle to the decoded preview of a selected file.
#[derive(Debug)]
pub struct PreviewRef {
    handle: Option<image::Handle>,
    released: bool,
}

impl PreviewRef {
    /// Acquires a preview for the file at `path`. Videos carry no decoded
    /// image; their draft tiles render a placeholder instead.
    #[must_use]
    pub fn acquire(path: &Path, kind: MediaKind) -> Self {
        let handle = match kind {
            MediaKind::Image => Some(image::Handle::from_path(path)),
            MediaKind::Video => None,
        };
        Self {
            handle,
            released: false,
        }
    }

    /// The renderable handle, if this preview is an image and still live.
    #[must_use]
    pub fn handle(&self) -> Option<&image::Handle> {
        if self.released {
            None
        } else {
            self.handle.as_ref()
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Releases the preview. Returns `false` if it was already released;
    /// a double release is an invariant violation on the caller's side.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.handle = None;
        self.released = true;
        true
    }
}

impl Drop for PreviewRef {
    fn drop(&mut self) {
        // Backstop: the draft manager releases on every removal path, so a
        // live handle here means an exit path was missed.
        if !self.released {
            self.release();
        }
    }
}

/// A selected local file staged for the next submission.
#[derive(Debug)]
pub struct MediaDraft {
    path: PathBuf,
    preview: PreviewRef,
    is_video: bool,
}

impl MediaDraft {
    fn new(path: PathBuf) -> Self {
        let kind = MediaKind::from_path(&path.to_string_lossy());
        let preview = PreviewRef::acquire(&path, kind);
        Self {
            path,
            preview,
            is_video: kind.is_video(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewRef {
        &self.preview
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.is_video
    }

    /// File name shown on the draft tile.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Ordered list of uncommitted media drafts.
///
/// No limit is enforced on count or size; the server is the arbiter of
/// oversized submissions.
#[derive(Debug, Default)]
pub struct DraftManager {
    drafts: Vec<MediaDraft>,
}

impl DraftManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn drafts(&self) -> &[MediaDraft] {
        &self.drafts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Paths of the raw files, in draft order. These are what a submission
    /// uploads; previews are never sent.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.drafts.iter().map(|d| d.path.clone()).collect()
    }

    /// Appends one draft per selected file, each with a fresh preview.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            self.drafts.push(MediaDraft::new(path));
        }
    }

    /// Releases the preview at `index` and removes the draft.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        if index >= self.drafts.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.drafts.len(),
            });
        }
        let mut draft = self.drafts.remove(index);
        draft.preview.release();
        Ok(())
    }

    /// Releases every preview and empties the list. Called on successful
    /// submission and on explicit cancellation.
    pub fn clear(&mut self) {
        for draft in &mut self.drafts {
            draft.preview.release();
        }
        self.drafts.clear();
    }
}
