//! Core of the gig-worker health-enrollment wizard: the form aggregate,
//! per-step validation, quote and subsidy math, and the orchestrator
//! that ties them together with autosave and submission. Front ends and
//! storage backends live in sibling crates.

pub mod calculations;
pub mod lookup;
pub mod models;
pub mod prefill;
pub mod validation;
pub mod wizard;

pub use models::*;
pub use validation::FieldError;
pub use wizard::store::{ProgressStore, SavedProgress, StoreError};
