//! Submission seam and the simulated backend behind it.
//!
//! There is no real enrollment API in this flow. `SimulatedGateway`
//! stands in for the eventual POST: it waits a configured latency and
//! fabricates a confirmation id. A production deployment replaces the
//! gateway implementation; the wizard's state machine stays the same.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::FormData;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A submission is already in flight or awaiting acknowledgement.
    #[error("a submission is already in progress")]
    InFlight,

    /// Submit was invoked from a step other than the review step.
    #[error("submission is only allowed from the review step")]
    NotOnReviewStep,

    /// The final-step validation rejected the aggregate; field errors
    /// are surfaced on the wizard.
    #[error("the application has validation errors")]
    Invalid,

    #[error("submission failed: {0}")]
    Gateway(String),
}

/// Receipt for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    /// Timestamp-derived lead id (`ENR-<millis>`). Not guaranteed
    /// globally unique; good enough for a lead-capture flow.
    pub confirmation_id: String,
    pub submitted_at: DateTime<Utc>,
}

/// Whatever ultimately receives a completed application.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(
        &self,
        form: &FormData,
    ) -> Result<Confirmation, SubmitError>;
}

/// Fake backend: sleep, then confirm.
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(
        &self,
        form: &FormData,
    ) -> Result<Confirmation, SubmitError> {
        tokio::time::sleep(self.latency).await;

        let submitted_at = Utc::now();
        let confirmation = Confirmation {
            confirmation_id: format!("ENR-{}", submitted_at.timestamp_millis()),
            submitted_at,
        };
        tracing::info!(
            confirmation_id = %confirmation.confirmation_id,
            applicant = %form.email,
            "application accepted (simulated)"
        );
        Ok(confirmation)
    }
}
