use async_trait::async_trait;
use perch_core::PerchResult;
use std::path::Path;

/// Key under which the ordered todo list is persisted.
pub const TODO_ITEMS_KEY: &str = "todo-items";

/// Key under which the widget's window geometry is persisted.
pub const WIDGET_STATE_KEY: &str = "widget-state";

/// Trait for abstract key-value storage.
/// Implementations handle different backends (files, databases, etc.).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> PerchResult<Option<Vec<u8>>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> PerchResult<()>;

    /// Delete the value stored under `key`. Deleting an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> PerchResult<()>;

    /// Root location of the store on disk.
    fn path(&self) -> &Path;
}

/// Trait for serialization/deserialization strategies.
/// Allows swapping JSON for binary formats, databases, etc.
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> PerchResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> PerchResult<T>;
}
