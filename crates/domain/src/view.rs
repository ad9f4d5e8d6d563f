//! Per-item display⇄edit view state.
//!
//! Every list item (group card, update card, comment row, member email) has
//! exactly two view states. Entering edit is a local flip with no network
//! call; leaving edit happens via explicit cancel or because a successful
//! save re-fetched and re-rendered the whole list, which resets every item.

use std::collections::HashSet;

use uuid::Uuid;

/// The two states an item's view can be in. There are no others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Display,
    Edit,
}

/// Tracks which items of one list are currently in edit mode.
///
/// Items toggle independently, so several may be editing at once. A refresh
/// (the re-render after any successful mutation) returns every item to
/// display, including items whose in-progress edits were never saved.
/// That loss is deliberate: the rendered list always reflects the last
/// successful server read.
#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    editing: HashSet<Uuid>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view state with a single item in edit mode, or none.
    pub fn with_editing(id: Option<Uuid>) -> Self {
        let mut state = Self::new();
        if let Some(id) = id {
            state.enter_edit(id);
        }
        state
    }

    pub fn mode(&self, id: Uuid) -> ViewMode {
        if self.editing.contains(&id) {
            ViewMode::Edit
        } else {
            ViewMode::Display
        }
    }

    pub fn enter_edit(&mut self, id: Uuid) {
        self.editing.insert(id);
    }

    /// Explicit cancel: back to display, local edits discarded.
    pub fn cancel_edit(&mut self, id: Uuid) {
        self.editing.remove(&id);
    }

    /// The post-mutation re-render: every item returns to display.
    pub fn refresh(&mut self) {
        self.editing.clear();
    }

    pub fn any_editing(&self) -> bool {
        !self.editing.is_empty()
    }
}
