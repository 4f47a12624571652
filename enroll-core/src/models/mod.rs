pub mod form_data;
pub mod household;
pub mod income;
pub mod plan;
pub mod sep;
pub mod step;

pub use form_data::{Consent, FormData, TobaccoStatus};
pub use household::{Gender, HouseholdMember, MemberType};
pub use income::{IncomeData, WorkType};
pub use plan::{InsurancePlan, MetalLevel, QuoteResult};
pub use sep::{QualifyingEvent, SepEligibility};
pub use step::StepId;
