//! Browser-style back/forward history over folder selections.

use serde::Serialize;

use studylib_core::types::FolderId;

/// Ordered folder selections with a cursor. `None` is the library root.
///
/// The cursor always indexes a valid entry. Selecting while the cursor is
/// behind the end discards the forward tail first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationHistory {
    entries: Vec<Option<FolderId>>,
    cursor: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    /// History positioned at the root.
    pub fn new() -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
        }
    }

    /// Select a folder (or the root). Returns `false` when it is already
    /// the current entry, in which case nothing changes.
    pub fn select(&mut self, folder: Option<FolderId>) -> bool {
        if self.entries[self.cursor] == folder {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(folder);
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back. Returns whether the cursor moved.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward. Returns whether the cursor moved.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn current(&self) -> Option<&FolderId> {
        self.entries[self.cursor].as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[Option<FolderId>] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Remove every entry for a deleted folder.
    ///
    /// Neighbours that become equal are collapsed into one entry. If the
    /// cursor sat on a removed entry it moves to the nearest earlier one.
    pub fn forget(&mut self, folder: &FolderId) {
        let mut kept: Vec<Option<FolderId>> = Vec::with_capacity(self.entries.len());
        let mut cursor = 0;

        for (index, entry) in self.entries.drain(..).enumerate() {
            let removed = entry.as_ref() == Some(folder);
            if !removed && kept.last() != Some(&entry) {
                kept.push(entry);
            }
            if index == self.cursor {
                cursor = kept.len().saturating_sub(1);
            }
        }

        if kept.is_empty() {
            kept.push(None);
        }
        self.entries = kept;
        self.cursor = cursor;
    }
}
