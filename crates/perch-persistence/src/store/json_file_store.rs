use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use perch_core::{PerchError, PerchResult};
use std::path::{Path, PathBuf};

/// File-per-key JSON store.
///
/// Each key maps to `<dir>/<key>.json`. Keys are restricted to a conservative
/// character set so a key can never escape the store directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PerchResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PerchError::Storage(format!("invalid store key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> PerchResult<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = AtomicWriter::read_all(&path).await?;
        tracing::debug!(key, "loaded {} bytes", bytes.len());
        Ok(Some(bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> PerchResult<()> {
        let path = self.key_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        AtomicWriter::write_atomic(&path, value).await?;
        tracing::debug!(key, "saved {} bytes", value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PerchResult<()> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path(&self) -> &Path {
        &self.dir
    }
}
