use std::sync::Mutex;

use async_trait::async_trait;
use enroll_core::wizard::store::{ProgressStore, SavedProgress, StoreError};

/// In-memory store: tests and `--fresh` sessions that should leave no
/// trace on disk.
#[derive(Default)]
pub struct MemoryProgressStore {
    blob: Mutex<Option<SavedProgress>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn load(&self) -> Result<Option<SavedProgress>, StoreError> {
        Ok(self.blob.lock().expect("store mutex poisoned").clone())
    }

    async fn save(
        &self,
        progress: &SavedProgress,
    ) -> Result<(), StoreError> {
        *self.blob.lock().expect("store mutex poisoned") = Some(progress.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.blob.lock().expect("store mutex poisoned") = None;
        Ok(())
    }
}
