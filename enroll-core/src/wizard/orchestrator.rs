//! The wizard orchestrator: step gating, autosave and submission.
//!
//! One `Wizard` owns the whole form aggregate. Steps mutate it through
//! [`Wizard::update`], which is also what arms the autosave debounce
//! timer; `advance` is the only validation gate. Submission runs through
//! a four-state machine (`Idle -> Submitting -> Success | Error`) that
//! rejects re-entrant submits.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::{ProgressStore, SavedProgress};
use super::submission::{Confirmation, SubmissionGateway, SubmitError};
use crate::models::{FormData, StepId};
use crate::validation::{FieldError, validate_step};

/// Tunables for the orchestrator. Defaults match the documented flow:
/// 1000 ms autosave debounce, 24 h resume window.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Trailing-edge quiet period before an edit is persisted.
    pub autosave_debounce: Duration,
    /// Saved progress older than this is discarded at mount.
    pub resume_window: Duration,
    /// How long the front end shows the confirmation before the state
    /// machine is returned to idle.
    pub success_display: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            autosave_debounce: Duration::from_millis(1000),
            resume_window: Duration::from_secs(24 * 60 * 60),
            success_display: Duration::from_secs(5),
        }
    }
}

/// Submission state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success(Confirmation),
    Error(String),
}

/// What the autosave indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveStatus {
    /// Nothing to write since the last save (or ever).
    Idle,
    /// An edit is waiting out the debounce window.
    Pending,
    Saved,
    /// The last write failed; editing continues regardless.
    Error,
}

pub struct Wizard {
    form: FormData,
    step: StepId,
    errors: Vec<FieldError>,
    show_errors: bool,
    submission: SubmissionState,
    store: Arc<dyn ProgressStore>,
    gateway: Arc<dyn SubmissionGateway>,
    config: WizardConfig,
    autosave_task: Option<JoinHandle<()>>,
    status_tx: Arc<watch::Sender<AutosaveStatus>>,
    status_rx: watch::Receiver<AutosaveStatus>,
}

impl Wizard {
    pub fn new(
        store: Arc<dyn ProgressStore>,
        gateway: Arc<dyn SubmissionGateway>,
        config: WizardConfig,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(AutosaveStatus::Idle);
        Self {
            form: FormData::default(),
            step: StepId::PersonalInfo,
            errors: Vec::new(),
            show_errors: false,
            submission: SubmissionState::Idle,
            store,
            gateway,
            config,
            autosave_task: None,
            status_tx: Arc::new(status_tx),
            status_rx,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether field errors should currently be rendered. Stays false
    /// while the user edits so fields are not red-lined prematurely;
    /// set by a failed `advance` or `submit`.
    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        *self.status_rx.borrow()
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Applies one edit to the aggregate and arms the autosave timer.
    ///
    /// This is the sole mutation funnel: steps never hold the form
    /// directly, so every change gets the same debounce treatment.
    pub fn update<F>(
        &mut self,
        mutate: F,
    ) where
        F: FnOnce(&mut FormData),
    {
        mutate(&mut self.form);
        self.schedule_autosave();
    }

    /// Validates the current step and moves forward on success.
    ///
    /// On failure the field errors are surfaced (and `show_errors` set)
    /// and the step does not change. Advancing from the review step is
    /// a no-op that still reports success.
    pub fn advance(
        &mut self,
        today: NaiveDate,
    ) -> Result<(), &[FieldError]> {
        match validate_step(self.step, &self.form, today) {
            Ok(()) => {
                self.errors.clear();
                self.show_errors = false;
                if let Some(next) = self.step.next() {
                    tracing::debug!(from = ?self.step, to = ?next, "step advanced");
                    self.step = next;
                    self.schedule_autosave();
                }
                Ok(())
            }
            Err(errors) => {
                tracing::debug!(step = ?self.step, count = errors.len(), "step blocked");
                self.errors = errors;
                self.show_errors = true;
                Err(&self.errors)
            }
        }
    }

    /// Steps back without re-validating, floored at the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.errors.clear();
            self.show_errors = false;
            self.schedule_autosave();
        }
    }

    /// Rehydrates saved progress at mount.
    ///
    /// Adopts the saved form and step when the blob is younger than the
    /// resume window; a stale blob is cleared and the wizard starts
    /// fresh. Load failures (corrupt blob, unreadable storage) also fall
    /// back to a fresh start; they are logged, never propagated.
    pub async fn resume(&mut self) -> bool {
        let saved = match self.store.load().await {
            Ok(saved) => saved,
            Err(error) => {
                tracing::warn!(%error, "could not read saved progress; starting fresh");
                return false;
            }
        };

        match saved {
            Some(progress) if self.is_fresh(&progress) => {
                tracing::info!(step = ?progress.step, "resuming saved application");
                self.form = progress.data;
                self.step = progress.step;
                true
            }
            Some(_) => {
                tracing::info!("saved application is older than the resume window; discarding");
                if let Err(error) = self.store.clear().await {
                    tracing::warn!(%error, "failed to clear stale progress");
                }
                false
            }
            None => false,
        }
    }

    fn is_fresh(
        &self,
        progress: &SavedProgress,
    ) -> bool {
        let age = Utc::now() - progress.timestamp;
        // A future timestamp (clock skew) counts as fresh rather than stale.
        age.to_std()
            .map(|age| age <= self.config.resume_window)
            .unwrap_or(true)
    }

    /// Submits the completed application from the review step.
    ///
    /// Runs the final-step validation first; rejects re-entrant calls
    /// while a submission is in flight or a confirmation is still
    /// displayed. On success the autosave blob is cleared. On gateway
    /// failure the machine lands in `Error` and [`Wizard::retry`]
    /// re-arms it.
    pub async fn submit(
        &mut self,
        today: NaiveDate,
    ) -> Result<Confirmation, SubmitError> {
        match self.submission {
            SubmissionState::Submitting | SubmissionState::Success(_) => {
                return Err(SubmitError::InFlight);
            }
            SubmissionState::Idle | SubmissionState::Error(_) => {}
        }
        if !self.step.is_last() {
            return Err(SubmitError::NotOnReviewStep);
        }
        if let Err(errors) = validate_step(self.step, &self.form, today) {
            self.errors = errors;
            self.show_errors = true;
            return Err(SubmitError::Invalid);
        }

        self.submission = SubmissionState::Submitting;
        self.cancel_pending_autosave();

        match self.gateway.submit(&self.form).await {
            Ok(confirmation) => {
                if let Err(error) = self.store.clear().await {
                    tracing::warn!(%error, "failed to clear progress after submission");
                }
                self.submission = SubmissionState::Success(confirmation.clone());
                Ok(confirmation)
            }
            Err(error) => {
                tracing::warn!(%error, "submission failed");
                self.submission = SubmissionState::Error(error.to_string());
                Err(error)
            }
        }
    }

    /// `Error -> Idle`: re-arms the submit button after a failure.
    pub fn retry(&mut self) {
        if matches!(self.submission, SubmissionState::Error(_)) {
            self.submission = SubmissionState::Idle;
        }
    }

    /// `Success -> Idle`: called once the confirmation has been shown.
    /// Resets the aggregate for a fresh application.
    pub fn acknowledge(&mut self) {
        if matches!(self.submission, SubmissionState::Success(_)) {
            self.submission = SubmissionState::Idle;
            self.form = FormData::default();
            self.step = StepId::PersonalInfo;
            self.errors.clear();
            self.show_errors = false;
        }
    }

    /// Waits for any pending debounced save to land. Used at shutdown
    /// and in tests; the normal flow never needs it.
    pub async fn flush_autosave(&mut self) {
        if let Some(task) = self.autosave_task.take() {
            let _ = task.await;
        }
    }

    /// Cancel-and-respawn debounce: each edit replaces the pending
    /// timer, so a burst of edits coalesces into one write carrying the
    /// final snapshot.
    fn schedule_autosave(&mut self) {
        self.cancel_pending_autosave();

        let snapshot = SavedProgress {
            data: self.form.clone(),
            step: self.step,
            timestamp: Utc::now(),
        };
        let store = Arc::clone(&self.store);
        let status = Arc::clone(&self.status_tx);
        let debounce = self.config.autosave_debounce;

        status.send_replace(AutosaveStatus::Pending);
        self.autosave_task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match store.save(&snapshot).await {
                Ok(()) => {
                    status.send_replace(AutosaveStatus::Saved);
                }
                Err(error) => {
                    tracing::warn!(%error, "autosave failed");
                    status.send_replace(AutosaveStatus::Error);
                }
            }
        }));
    }

    fn cancel_pending_autosave(&mut self) {
        if let Some(task) = self.autosave_task.take() {
            task.abort();
        }
    }
}

impl Drop for Wizard {
    fn drop(&mut self) {
        // A timer left running after the wizard is gone would still
        // write; the blob must not outlive an abandoned session object.
        self.cancel_pending_autosave();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{QualifyingEvent, TobaccoStatus, WorkType};
    use crate::wizard::store::StoreError;
    use crate::wizard::submission::SimulatedGateway;

    /// In-memory store for orchestrator tests; the real backends live
    /// in enroll-store.
    #[derive(Default)]
    struct MemStore {
        blob: Mutex<Option<SavedProgress>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl ProgressStore for MemStore {
        async fn load(&self) -> Result<Option<SavedProgress>, StoreError> {
            Ok(self.blob.lock().unwrap().clone())
        }

        async fn save(
            &self,
            progress: &SavedProgress,
        ) -> Result<(), StoreError> {
            if self.fail_saves {
                return Err(StoreError::Storage("quota exceeded".into()));
            }
            *self.blob.lock().unwrap() = Some(progress.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            *self.blob.lock().unwrap() = None;
            Ok(())
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl SubmissionGateway for FailingGateway {
        async fn submit(
            &self,
            _form: &FormData,
        ) -> Result<Confirmation, SubmitError> {
            Err(SubmitError::Gateway("boom".into()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    fn test_config() -> WizardConfig {
        WizardConfig {
            autosave_debounce: Duration::from_millis(1000),
            resume_window: Duration::from_secs(24 * 60 * 60),
            success_display: Duration::from_millis(1),
        }
    }

    fn wizard_with(
        store: Arc<MemStore>,
        gateway: Arc<dyn SubmissionGateway>,
    ) -> Wizard {
        Wizard::new(store, gateway, test_config())
    }

    fn fill_valid(wizard: &mut Wizard) {
        wizard.update(|form| {
            form.first_name = "Maria".into();
            form.last_name = "Santos".into();
            form.email = "maria@example.com".into();
            form.phone = "(813) 555-0123".into();
            form.date_of_birth = NaiveDate::from_ymd_opt(1992, 4, 10);
            form.ssn = "123-45-6789".into();
            form.tobacco_status = Some(TobaccoStatus::No);
            form.street_address = "742 Palm Ave".into();
            form.city = "Tampa".into();
            form.state = "FL".into();
            form.zip_code = "33601".into();
            form.income.total_annual_income = dec!(45000);
            form.income.primary_income_type = Some(WorkType::Rideshare);
            form.income.redistribute();
            form.sep.categories = vec![QualifyingEvent::OpenEnrollment];
            form.selected_plan_id = Some("silver-flex".into());
            form.consent.terms_accepted = true;
            form.consent.privacy_accepted = true;
            form.consent.signature = "Maria Santos".into();
        });
    }

    fn advance_to_review(wizard: &mut Wizard) {
        while !wizard.step().is_last() {
            let step = wizard.step();
            if wizard.advance(today()).is_err() {
                panic!("blocked at {step:?}");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn advance_is_gated_by_the_current_step() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(store, Arc::new(SimulatedGateway::default()));

        // Empty form: step must not move, errors must surface.
        assert!(wizard.advance(today()).is_err());
        assert_eq!(wizard.step(), StepId::PersonalInfo);
        assert!(wizard.show_errors());
        assert!(!wizard.errors().is_empty());

        fill_valid(&mut wizard);
        wizard.advance(today()).unwrap();
        assert_eq!(wizard.step(), StepId::Eligibility);
        assert!(!wizard.show_errors());
        assert!(wizard.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_is_unconditional_and_floored() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(store, Arc::new(SimulatedGateway::default()));

        wizard.retreat();
        assert_eq!(wizard.step(), StepId::PersonalInfo);

        fill_valid(&mut wizard);
        wizard.advance(today()).unwrap();
        wizard.advance(today()).unwrap();
        wizard.retreat();
        assert_eq!(wizard.step(), StepId::Eligibility);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_coalesce_into_one_autosave() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));

        wizard.update(|f| f.first_name = "M".into());
        wizard.update(|f| f.first_name = "Ma".into());
        wizard.update(|f| f.first_name = "Maria".into());
        assert_eq!(wizard.autosave_status(), AutosaveStatus::Pending);

        wizard.flush_autosave().await;

        assert_eq!(wizard.autosave_status(), AutosaveStatus::Saved);
        let blob = store.blob.lock().unwrap().clone().unwrap();
        assert_eq!(blob.data.first_name, "Maria");
    }

    #[tokio::test(start_paused = true)]
    async fn autosave_failure_is_surfaced_not_fatal() {
        let store = Arc::new(MemStore {
            fail_saves: true,
            ..MemStore::default()
        });
        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));

        wizard.update(|f| f.first_name = "Maria".into());
        wizard.flush_autosave().await;

        assert_eq!(wizard.autosave_status(), AutosaveStatus::Error);
        // Editing continues.
        assert_eq!(wizard.form().first_name, "Maria");
    }

    #[tokio::test(start_paused = true)]
    async fn resume_adopts_recent_progress() {
        let store = Arc::new(MemStore::default());
        {
            let mut wizard =
                wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));
            fill_valid(&mut wizard);
            wizard.advance(today()).unwrap();
            wizard.flush_autosave().await;
        }

        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));
        assert!(wizard.resume().await);
        assert_eq!(wizard.step(), StepId::Eligibility);
        assert_eq!(wizard.form().first_name, "Maria");
    }

    #[tokio::test(start_paused = true)]
    async fn resume_discards_stale_progress() {
        let store = Arc::new(MemStore::default());
        *store.blob.lock().unwrap() = Some(SavedProgress {
            data: FormData::default(),
            step: StepId::Income,
            timestamp: Utc::now() - chrono::Duration::hours(25),
        });

        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));
        assert!(!wizard.resume().await);
        assert_eq!(wizard.step(), StepId::PersonalInfo);
        assert!(store.blob.lock().unwrap().is_none(), "stale blob not cleared");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_happy_path_clears_the_store() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(SimulatedGateway::default()));

        fill_valid(&mut wizard);
        advance_to_review(&mut wizard);
        wizard.flush_autosave().await;
        assert!(store.blob.lock().unwrap().is_some());

        let confirmation = wizard.submit(today()).await.unwrap();

        assert!(confirmation.confirmation_id.starts_with("ENR-"));
        assert!(matches!(wizard.submission(), SubmissionState::Success(_)));
        assert!(store.blob.lock().unwrap().is_none(), "blob survived submission");

        wizard.acknowledge();
        assert_eq!(*wizard.submission(), SubmissionState::Idle);
        assert_eq!(wizard.step(), StepId::PersonalInfo);
        assert_eq!(wizard.form().first_name, "");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_rejected_off_the_review_step() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(store, Arc::new(SimulatedGateway::default()));
        fill_valid(&mut wizard);

        let result = wizard.submit(today()).await;
        assert_eq!(result, Err(SubmitError::NotOnReviewStep));
        assert_eq!(*wizard.submission(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_rejected_without_consent() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(store, Arc::new(SimulatedGateway::default()));
        fill_valid(&mut wizard);
        advance_to_review(&mut wizard);
        wizard.update(|f| f.consent.terms_accepted = false);

        let result = wizard.submit(today()).await;

        assert_eq!(result, Err(SubmitError::Invalid));
        assert!(wizard.show_errors());
        assert_eq!(wizard.errors()[0].field, "consent.termsAccepted");
    }

    #[tokio::test(start_paused = true)]
    async fn re_entrant_submit_is_rejected_while_confirmation_shows() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(store, Arc::new(SimulatedGateway::default()));
        fill_valid(&mut wizard);
        advance_to_review(&mut wizard);

        wizard.submit(today()).await.unwrap();
        // Success not yet acknowledged: a second click must bounce.
        assert_eq!(wizard.submit(today()).await, Err(SubmitError::InFlight));
    }

    #[tokio::test(start_paused = true)]
    async fn gateway_failure_lands_in_error_and_retry_rearms() {
        let store = Arc::new(MemStore::default());
        let mut wizard = wizard_with(Arc::clone(&store), Arc::new(FailingGateway));
        fill_valid(&mut wizard);
        advance_to_review(&mut wizard);

        let result = wizard.submit(today()).await;
        assert!(matches!(result, Err(SubmitError::Gateway(_))));
        assert!(matches!(wizard.submission(), SubmissionState::Error(_)));

        wizard.retry();
        assert_eq!(*wizard.submission(), SubmissionState::Idle);
    }
}
