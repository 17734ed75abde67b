use perch_core::PerchResult;
use std::path::Path;
use tokio::fs;

/// Write-to-temp-then-rename file replacement.
///
/// A crash mid-write leaves either the old value or the new one on disk,
/// never a torn file.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Replace the contents of `path` atomically.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> PerchResult<()> {
        // Temp file must live in the same directory so the rename stays on
        // one filesystem.
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.path().to_path_buf();

        tokio::fs::write(&temp_path, data).await?;

        // Rename is atomic on POSIX filesystems.
        fs::rename(&temp_path, path).await?;

        tracing::debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Read the full contents of `path`.
    pub async fn read_all(path: &Path) -> PerchResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
