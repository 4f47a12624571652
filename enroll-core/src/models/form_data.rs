use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::household::HouseholdMember;
use super::income::IncomeData;
use super::sep::SepEligibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TobaccoStatus {
    Yes,
    No,
}

/// Final-step consent flags and signature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
    pub marketing_accepted: bool,
    /// Typed name or drawn-signature image data.
    pub signature: String,
}

/// The single mutable aggregate behind the whole wizard.
///
/// Every step reads and writes a slice of this struct; the orchestrator
/// serializes it wholesale into the autosave blob. Field names follow
/// the camelCase shape of the `enrollmentProgress` JSON document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    // Identity
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    // Eligibility
    pub date_of_birth: Option<NaiveDate>,
    pub ssn: String,
    pub tobacco_status: Option<TobaccoStatus>,

    // Location
    pub street_address: String,
    pub apartment_unit: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,

    pub household_members: Vec<HouseholdMember>,
    pub income: IncomeData,

    /// Catalog id of the chosen plan, once the applicant has picked one.
    pub selected_plan_id: Option<String>,

    pub sep: SepEligibility,
    pub consent: Consent,
}

impl FormData {
    /// Applicant plus every listed household member, whether or not
    /// they are applying for coverage; this is the FPL household size.
    pub fn household_size(&self) -> u32 {
        1 + self.household_members.len() as u32
    }
}
