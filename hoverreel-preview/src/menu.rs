//! Grid-level "one contextual menu at a time" state.
//!
//! Owned by the grid and passed down to tiles; there is no global registry.

use hoverreel_model::ContentId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuSlot {
    open: Option<ContentId>,
}

impl ContextMenuSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ContentId> {
        self.open.as_ref()
    }

    pub fn is_open(&self, id: &ContentId) -> bool {
        self.open.as_ref() == Some(id)
    }

    /// Open `id`'s menu. Returns the menu the caller must close, if another
    /// one was open.
    pub fn open(&mut self, id: ContentId) -> Option<ContentId> {
        match self.open.replace(id) {
            Some(previous) if self.open.as_ref() != Some(&previous) => {
                Some(previous)
            }
            _ => None,
        }
    }

    /// Close `id`'s menu. Closing a menu that is not the open one does
    /// nothing.
    pub fn close(&mut self, id: &ContentId) -> bool {
        if self.is_open(id) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Returns the menu to close, as [`Self::open`] does.
    pub fn toggle(&mut self, id: ContentId) -> Option<ContentId> {
        if self.is_open(&id) {
            self.open = None;
            None
        } else {
            self.open(id)
        }
    }

    pub fn close_all(&mut self) -> Option<ContentId> {
        self.open.take()
    }
}
