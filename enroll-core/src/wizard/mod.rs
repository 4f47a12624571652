pub mod orchestrator;
pub mod store;
pub mod submission;

pub use orchestrator::{AutosaveStatus, SubmissionState, Wizard, WizardConfig};
pub use store::{ProgressStore, STORAGE_KEY, SavedProgress, StoreError};
pub use submission::{Confirmation, SimulatedGateway, SubmissionGateway, SubmitError};
