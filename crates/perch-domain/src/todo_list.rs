//! Insertion-ordered todo collection.
//!
//! Pure list operations shared by the session and its tests. Empty-trimming
//! input is rejected up front so callers never have to special-case it, and
//! the insertion order is never disturbed by edits or completion toggles.

use crate::todo::{TodoId, TodoItem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append a new item. Returns `None` without touching the list when the
    /// text trims to empty.
    pub fn add(&mut self, text: &str) -> Option<TodoId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let item = TodoItem::new(trimmed.to_string());
        let id = item.id;
        self.items.push(item);
        Some(id)
    }

    /// Replace the text on the matching item. A blank replacement or an
    /// unknown id leaves the list unchanged and returns `false`.
    pub fn edit(&mut self, id: TodoId, new_text: &str) -> bool {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(item) => {
                item.update_text(trimmed.to_string());
                true
            }
            None => false,
        }
    }

    pub fn set_completed(&mut self, id: TodoId, completed: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.set_completed(completed);
                true
            }
            None => false,
        }
    }

    /// Permanently remove the item, returning it if it existed.
    pub fn remove(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
