use std::path::{Path, PathBuf};

use async_trait::async_trait;
use enroll_core::wizard::store::{ProgressStore, STORAGE_KEY, SavedProgress, StoreError};

/// Autosave blob as a JSON document on disk.
///
/// The blob lives at `<dir>/enrollmentProgress.json`. The directory is
/// created on the first save; a missing file on load means "nothing
/// saved". Writes go through a temp file and rename so an interrupted
/// save never leaves a half-written blob behind.
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Full path of the blob file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io_err(error: std::io::Error) -> StoreError {
    StoreError::Storage(error.to_string())
}

#[async_trait]
impl ProgressStore for FileProgressStore {
    async fn load(&self) -> Result<Option<SavedProgress>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(io_err(error)),
        };

        let progress = serde_json::from_slice(&bytes)
            .map_err(|error| StoreError::Corrupt(error.to_string()))?;
        Ok(Some(progress))
    }

    async fn save(
        &self,
        progress: &SavedProgress,
    ) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(progress)
            .map_err(|error| StoreError::Storage(error.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "progress saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_err(error)),
        }
    }
}
