use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form_data::TobaccoStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Spouse,
    Dependent,
}

impl MemberType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spouse => "Spouse",
            Self::Dependent => "Dependent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// A spouse or dependent listed on the application.
///
/// `is_expanded` is carried for the front end's accordion state and is
/// ignored by validation and quoting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    pub id: Uuid,
    pub member_type: MemberType,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub ssn: String,
    pub is_applying_for_coverage: bool,
    pub tobacco_status: Option<TobaccoStatus>,
    pub medicaid_denied: bool,
    pub medicaid_denied_date: Option<NaiveDate>,
    pub is_expanded: bool,
}

impl HouseholdMember {
    /// A blank member of the given type, expanded so the form opens on it.
    pub fn new(member_type: MemberType) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_type,
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: None,
            gender: None,
            ssn: String::new(),
            is_applying_for_coverage: true,
            tobacco_status: None,
            medicaid_denied: false,
            medicaid_denied_date: None,
            is_expanded: true,
        }
    }
}
