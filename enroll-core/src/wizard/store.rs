//! Autosave persistence seam.
//!
//! The wizard never talks to a concrete storage backend; it holds a
//! `dyn ProgressStore` and serializes the whole aggregate through it.
//! Backends live in the `enroll-store` crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FormData, StepId};

/// Fixed key the autosave blob is stored under.
pub const STORAGE_KEY: &str = "enrollmentProgress";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("corrupt saved progress: {0}")]
    Corrupt(String),
}

/// The `enrollmentProgress` document: the full form aggregate, the step
/// the applicant was on, and when it was written.
///
/// `step` is serialized as the 1-indexed ordinal so the blob stays a
/// plain `{data, step, timestamp}` JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub data: FormData,
    #[serde(with = "step_as_ordinal")]
    pub step: StepId,
    pub timestamp: DateTime<Utc>,
}

mod step_as_ordinal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::StepId;

    pub fn serialize<S: Serializer>(
        step: &StepId,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(step.ordinal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StepId, D::Error> {
        let ordinal = u8::deserialize(deserializer)?;
        StepId::from_ordinal(ordinal)
            .ok_or_else(|| D::Error::custom(format!("step ordinal {ordinal} out of range")))
    }
}

/// Where autosaved progress lives.
///
/// Implementations are single-writer: the wizard's debounce timer is the
/// only caller of `save`, and `load` happens once at mount.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// The saved blob, or `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<SavedProgress>, StoreError>;

    async fn save(
        &self,
        progress: &SavedProgress,
    ) -> Result<(), StoreError>;

    /// Removes any saved blob. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}
