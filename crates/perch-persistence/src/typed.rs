//! Typed reads and writes over the raw key-value store.
//!
//! Storage failures are a recoverable condition for the widget: a missing or
//! malformed record falls back to the caller's default and the problem is
//! logged, never surfaced.

use crate::traits::{KeyValueStore, Serializer};
use perch_core::PerchResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and deserialize the record under `key`, falling back to
/// `T::default()` when the key is absent or the bytes don't parse.
pub async fn read_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: Default + Serialize + DeserializeOwned + Send + Sync,
{
    read_optional(store, key).await.unwrap_or_default()
}

/// Read and deserialize the record under `key`, or `None` when the key is
/// absent or the bytes don't parse.
pub async fn read_optional<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    let bytes = match store.get(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted value");
            return None;
        }
    };

    let serializer = crate::serialization::JsonSerializer;
    match Serializer::<T>::deserialize(&serializer, &bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "persisted value is malformed, ignoring it");
            None
        }
    }
}

/// Serialize and persist `value` under `key`.
pub async fn write_value<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> PerchResult<()>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    let serializer = crate::serialization::JsonSerializer;
    let bytes = Serializer::<T>::serialize(&serializer, value)?;
    store.set(key, &bytes).await
}
