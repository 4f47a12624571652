use serde::{Deserialize, Serialize};

/// One page of the enrollment wizard, in visit order.
///
/// Steps are addressed by variant rather than by raw index so the
/// validator map and the orchestrator cannot drift out of sync with a
/// renumbered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepId {
    PersonalInfo,
    Eligibility,
    Address,
    Household,
    Income,
    SpecialEnrollment,
    PlanSelection,
    Review,
}

impl StepId {
    /// Every step, in wizard order.
    pub const ALL: [StepId; 8] = [
        Self::PersonalInfo,
        Self::Eligibility,
        Self::Address,
        Self::Household,
        Self::Income,
        Self::SpecialEnrollment,
        Self::PlanSelection,
        Self::Review,
    ];

    /// Total number of wizard steps.
    pub const TOTAL: u8 = Self::ALL.len() as u8;

    /// 1-indexed position of this step, as shown in the progress header.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::Eligibility => 2,
            Self::Address => 3,
            Self::Household => 4,
            Self::Income => 5,
            Self::SpecialEnrollment => 6,
            Self::PlanSelection => 7,
            Self::Review => 8,
        }
    }

    /// Looks up a step by its 1-indexed ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal.checked_sub(1)? as usize).copied()
    }

    /// The following step, or `None` from the last step.
    pub fn next(&self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// The preceding step, or `None` from the first step.
    pub fn prev(&self) -> Option<Self> {
        Self::from_ordinal(self.ordinal().wrapping_sub(1))
    }

    pub fn is_first(&self) -> bool {
        *self == Self::PersonalInfo
    }

    pub fn is_last(&self) -> bool {
        *self == Self::Review
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Eligibility => "Eligibility",
            Self::Address => "Home Address",
            Self::Household => "Household Members",
            Self::Income => "Income",
            Self::SpecialEnrollment => "Special Enrollment",
            Self::PlanSelection => "Plan Selection",
            Self::Review => "Review & Sign",
        }
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::PersonalInfo
    }
}
