//! Per-step validation of the form aggregate.
//!
//! Each wizard step owns a validator over exactly the fields that step
//! edits; the orchestrator gates `advance` on the current step's
//! validator only. Earlier steps were already gated when the user passed
//! them, so there is no cumulative re-check.

mod fields;
mod steps;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{FormData, StepId};

/// A validation failure attached to one field path.
///
/// Field paths use the aggregate's camelCase JSON names, with indices
/// for household members (`householdMembers[1].ssn`), so the front end
/// can attach messages next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates the fields belonging to `step` against the full aggregate.
///
/// `today` anchors every date rule (age, SEP lookback) so callers and
/// tests control the clock.
pub fn validate_step(
    step: StepId,
    form: &FormData,
    today: NaiveDate,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    match step {
        StepId::PersonalInfo => steps::personal_info(form, &mut errors),
        StepId::Eligibility => steps::eligibility(form, today, &mut errors),
        StepId::Address => steps::address(form, &mut errors),
        StepId::Household => steps::household(form, today, &mut errors),
        StepId::Income => steps::income(form, &mut errors),
        StepId::SpecialEnrollment => steps::special_enrollment(form, today, &mut errors),
        StepId::PlanSelection => steps::plan_selection(form, &mut errors),
        StepId::Review => steps::review(form, &mut errors),
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
