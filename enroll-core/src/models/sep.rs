use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Qualifying life events for a Special Enrollment Period.
///
/// `OpenEnrollment` and `NoneApply` are not life events; they mark the
/// applicant as either inside the annual window or without a qualifying
/// event, and both waive the event-detail requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualifyingEvent {
    LostCoverage,
    Moved,
    Married,
    Divorced,
    BirthOrAdoption,
    MedicaidDenial,
    OpenEnrollment,
    NoneApply,
}

impl QualifyingEvent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LostCoverage => "Lost other health coverage",
            Self::Moved => "Moved to a new area",
            Self::Married => "Got married",
            Self::Divorced => "Got divorced",
            Self::BirthOrAdoption => "Had or adopted a child",
            Self::MedicaidDenial => "Denied Medicaid or CHIP",
            Self::OpenEnrollment => "Enrolling during Open Enrollment",
            Self::NoneApply => "None of these apply",
        }
    }

    /// Days back from today within which the event must have occurred.
    /// Loss of coverage gets the longer federal window.
    pub fn lookback_days(&self) -> i64 {
        match self {
            Self::LostCoverage => 90,
            _ => 60,
        }
    }

    /// True for the pseudo-events that waive SEP documentation.
    pub fn waives_event_details(&self) -> bool {
        matches!(self, Self::OpenEnrollment | Self::NoneApply)
    }
}

/// Whether the applicant may enroll outside Open Enrollment, and on the
/// strength of which event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepEligibility {
    pub is_eligible: bool,
    pub categories: Vec<QualifyingEvent>,
    pub event_date: Option<NaiveDate>,
    pub event_type: Option<QualifyingEvent>,
    pub has_documentation: bool,
}

impl SepEligibility {
    /// True when the selected categories make event details unnecessary.
    pub fn details_waived(&self) -> bool {
        self.categories.iter().any(|c| c.waives_event_details())
    }
}
