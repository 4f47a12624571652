//! Integration tests for the file-backed progress store, including the
//! full save/resume round trip through the wizard.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use enroll_core::models::{FormData, StepId, TobaccoStatus, WorkType};
use enroll_core::wizard::{
    ProgressStore, SavedProgress, SimulatedGateway, Wizard, WizardConfig,
};
use enroll_store::FileProgressStore;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn sample_form() -> FormData {
    let mut form = FormData::default();
    form.first_name = "Maria".into();
    form.last_name = "Santos".into();
    form.email = "maria@example.com".into();
    form.phone = "(813) 555-0123".into();
    form.date_of_birth = NaiveDate::from_ymd_opt(1992, 4, 10);
    form.ssn = "123-45-6789".into();
    form.tobacco_status = Some(TobaccoStatus::No);
    form.city = "Tampa".into();
    form.state = "FL".into();
    form.zip_code = "33601".into();
    form.income.total_annual_income = dec!(45000);
    form.income.primary_income_type = Some(WorkType::Delivery);
    form.income.redistribute();
    form
}

#[tokio::test]
async fn missing_file_means_nothing_saved() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    assert_eq!(store.load().await.unwrap(), None);
    // Clearing an empty store is not an error either.
    store.clear().await.unwrap();
}

#[tokio::test]
async fn blob_round_trips_deep_equal() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    let progress = SavedProgress {
        data: sample_form(),
        step: StepId::Income,
        timestamp: Utc::now(),
    };
    store.save(&progress).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, progress);
}

#[tokio::test]
async fn blob_file_lives_under_the_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    store
        .save(&SavedProgress {
            data: FormData::default(),
            step: StepId::PersonalInfo,
            timestamp: Utc::now(),
        })
        .await
        .unwrap();

    assert!(dir.path().join("enrollmentProgress.json").is_file());
    assert_eq!(
        store.path(),
        dir.path().join("enrollmentProgress.json").as_path()
    );
}

#[tokio::test]
async fn corrupt_blob_is_reported_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    tokio::fs::write(store.path(), b"not json").await.unwrap();

    let error = store.load().await.unwrap_err();
    assert!(error.to_string().contains("corrupt"));
}

#[tokio::test]
async fn clear_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    store
        .save(&SavedProgress {
            data: sample_form(),
            step: StepId::Address,
            timestamp: Utc::now(),
        })
        .await
        .unwrap();
    store.clear().await.unwrap();

    assert!(!dir.path().join("enrollmentProgress.json").exists());
    assert_eq!(store.load().await.unwrap(), None);
}

/// Full wizard round trip over the file backend: edits saved on one
/// session are adopted by the next.
#[tokio::test]
async fn wizard_resumes_from_the_file_within_the_window() {
    let dir = tempfile::tempdir().unwrap();
    let config = WizardConfig {
        autosave_debounce: Duration::from_millis(1),
        ..WizardConfig::default()
    };

    {
        let store = Arc::new(FileProgressStore::new(dir.path()));
        let mut wizard = Wizard::new(store, Arc::new(SimulatedGateway::default()), config.clone());
        wizard.update(|form| *form = sample_form());
        wizard.flush_autosave().await;
    }

    let store = Arc::new(FileProgressStore::new(dir.path()));
    let mut wizard = Wizard::new(store, Arc::new(SimulatedGateway::default()), config);

    assert!(wizard.resume().await);
    assert_eq!(*wizard.form(), sample_form());
    assert_eq!(wizard.step(), StepId::PersonalInfo);
}

/// Saved progress older than 24 hours is discarded and the file removed.
#[tokio::test]
async fn wizard_discards_a_stale_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProgressStore::new(dir.path());

    store
        .save(&SavedProgress {
            data: sample_form(),
            step: StepId::Income,
            timestamp: Utc::now() - chrono::Duration::hours(25),
        })
        .await
        .unwrap();

    let mut wizard = Wizard::new(
        Arc::new(FileProgressStore::new(dir.path())),
        Arc::new(SimulatedGateway::default()),
        WizardConfig::default(),
    );

    assert!(!wizard.resume().await);
    assert_eq!(*wizard.form(), FormData::default());
    assert!(!dir.path().join("enrollmentProgress.json").exists());
}
