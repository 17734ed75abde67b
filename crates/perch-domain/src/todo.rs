use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TodoId = Uuid;

/// A single todo entry.
///
/// Plain data only: the pending-deletion timer for a checked-off item lives
/// in a side table keyed by id, never on the item itself, so the serialized
/// record is exactly these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_text(&mut self, text: String) {
        self.text = text;
        self.updated_at = Utc::now();
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.updated_at = Utc::now();
    }
}
