pub mod age;
pub mod common;
pub mod fpl;
pub mod quotes;

pub use age::age_on;
pub use fpl::{
    SubsidyLevel, estimate_monthly_savings, fpl_for_household, income_ratio, subsidy_level,
};
pub use quotes::{QuoteError, WorkerProfile, generate_quotes, plan_by_id, plan_catalog};
