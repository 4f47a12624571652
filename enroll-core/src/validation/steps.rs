//! One validator per wizard step.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::FieldError;
use super::fields;
use crate::calculations::{age_on, plan_by_id};
use crate::models::FormData;

const MIN_ANNUAL_INCOME: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MAX_ANNUAL_INCOME: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

fn push(
    errors: &mut Vec<FieldError>,
    field: impl Into<String>,
    message: Option<&'static str>,
) {
    if let Some(message) = message {
        errors.push(FieldError::new(field, message));
    }
}

pub fn personal_info(
    form: &FormData,
    errors: &mut Vec<FieldError>,
) {
    push(errors, "firstName", fields::name_error(&form.first_name));
    push(errors, "lastName", fields::name_error(&form.last_name));
    push(errors, "email", fields::email_error(&form.email));
    push(errors, "phone", fields::phone_error(&form.phone));
}

pub fn eligibility(
    form: &FormData,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) {
    match form.date_of_birth {
        None => errors.push(FieldError::new("dateOfBirth", "Date of birth is required")),
        Some(dob) if dob > today => {
            errors.push(FieldError::new("dateOfBirth", "Date of birth cannot be in the future"));
        }
        Some(dob) if age_on(dob, today) < 18 => {
            errors.push(FieldError::new(
                "dateOfBirth",
                "The primary applicant must be at least 18 years old",
            ));
        }
        Some(_) => {}
    }

    push(errors, "ssn", fields::ssn_error(&form.ssn));

    if form.tobacco_status.is_none() {
        errors.push(FieldError::new("tobaccoStatus", "Select yes or no"));
    }
}

pub fn address(
    form: &FormData,
    errors: &mut Vec<FieldError>,
) {
    push(errors, "streetAddress", fields::required_error(&form.street_address));
    push(errors, "city", fields::required_error(&form.city));
    push(errors, "state", fields::state_error(&form.state));
    push(errors, "zipCode", fields::zip_error(&form.zip_code));
}

pub fn household(
    form: &FormData,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) {
    for (i, member) in form.household_members.iter().enumerate() {
        let path = |field: &str| format!("householdMembers[{i}].{field}");

        push(errors, path("firstName"), fields::name_error(&member.first_name));
        push(errors, path("lastName"), fields::name_error(&member.last_name));

        let age = match member.date_of_birth {
            None => {
                errors.push(FieldError::new(path("dateOfBirth"), "Date of birth is required"));
                None
            }
            Some(dob) if dob > today => {
                errors.push(FieldError::new(
                    path("dateOfBirth"),
                    "Date of birth cannot be in the future",
                ));
                None
            }
            Some(dob) => Some(age_on(dob, today)),
        };

        if member.gender.is_none() {
            errors.push(FieldError::new(path("gender"), "Gender is required"));
        }

        // SSN only matters for members actually applying for coverage.
        if member.is_applying_for_coverage {
            push(errors, path("ssn"), fields::ssn_error(&member.ssn));

            if age.is_some_and(|a| a >= 18) && member.tobacco_status.is_none() {
                errors.push(FieldError::new(path("tobaccoStatus"), "Select yes or no"));
            }
        }

        if member.medicaid_denied && member.medicaid_denied_date.is_none() {
            errors.push(FieldError::new(
                path("medicaidDeniedDate"),
                "Enter the date Medicaid coverage was denied",
            ));
        }
    }
}

pub fn income(
    form: &FormData,
    errors: &mut Vec<FieldError>,
) {
    let income = &form.income;

    if income.total_annual_income < MIN_ANNUAL_INCOME {
        errors.push(FieldError::new(
            "income.totalAnnualIncome",
            "Annual income must be at least $1,000",
        ));
    } else if income.total_annual_income > MAX_ANNUAL_INCOME {
        errors.push(FieldError::new(
            "income.totalAnnualIncome",
            "Annual income cannot exceed $1,000,000",
        ));
    }

    if income.primary_income_type.is_none() {
        errors.push(FieldError::new(
            "income.primaryIncomeType",
            "Select your primary income type",
        ));
    }

    if income.is_dual_income
        && income.primary_income_amount + income.spouse_income_amount
            != income.total_annual_income
    {
        errors.push(FieldError::new(
            "income.primaryIncomeAmount",
            "The two income amounts must add up to the household total",
        ));
    }
}

pub fn special_enrollment(
    form: &FormData,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) {
    let sep = &form.sep;
    if sep.details_waived() {
        return;
    }

    let Some(event_type) = sep.event_type else {
        errors.push(FieldError::new("sep.eventType", "Select your qualifying life event"));
        return;
    };

    match sep.event_date {
        None => errors.push(FieldError::new("sep.eventDate", "Enter the date of the event")),
        Some(date) if date > today => {
            errors.push(FieldError::new("sep.eventDate", "The event date cannot be in the future"));
        }
        Some(date) => {
            let window = event_type.lookback_days();
            if (today - date).num_days() > window {
                errors.push(FieldError::new(
                    "sep.eventDate",
                    "The event falls outside the enrollment window for this event type",
                ));
            }
        }
    }

    if !sep.has_documentation {
        errors.push(FieldError::new(
            "sep.hasDocumentation",
            "Documentation of the qualifying event is required",
        ));
    }
}

pub fn plan_selection(
    form: &FormData,
    errors: &mut Vec<FieldError>,
) {
    match form.selected_plan_id.as_deref() {
        None => errors.push(FieldError::new("selectedPlanId", "Select a plan to continue")),
        Some(id) if plan_by_id(id).is_none() => {
            errors.push(FieldError::new("selectedPlanId", "The selected plan is not available"));
        }
        Some(_) => {}
    }
}

pub fn review(
    form: &FormData,
    errors: &mut Vec<FieldError>,
) {
    if !form.consent.terms_accepted {
        errors.push(FieldError::new(
            "consent.termsAccepted",
            "You must accept the terms of service",
        ));
    }
    if !form.consent.privacy_accepted {
        errors.push(FieldError::new(
            "consent.privacyAccepted",
            "You must accept the privacy policy",
        ));
    }
    if form.consent.signature.trim().is_empty() {
        errors.push(FieldError::new("consent.signature", "A signature is required"));
    }
}
