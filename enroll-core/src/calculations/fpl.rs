//! Federal Poverty Level lookup and subsidy estimation.
//!
//! The FPL figures are the 2024 HHS guidelines for the 48 contiguous
//! states. The savings tiers are illustrative placeholders for the lead
//! flow, not actuarial calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 2024 FPL by household size, sizes 1 through 8.
const FPL_TABLE: [i64; 8] = [15060, 20440, 25820, 31200, 36580, 41960, 47340, 52720];

/// Added per household member beyond eight.
const FPL_PER_ADDITIONAL: i64 = 5380;

/// Subsidy band for an income relative to the FPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubsidyLevel {
    /// At or below 150% of FPL.
    FullSubsidies,
    /// Above 150% and at or below 400% of FPL.
    SomeSubsidies,
    /// Above 400% of FPL.
    NoSubsidies,
}

impl SubsidyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullSubsidies => "Full Subsidies",
            Self::SomeSubsidies => "Some Subsidies",
            Self::NoSubsidies => "No Subsidies",
        }
    }
}

/// Federal Poverty Level for a household of `size` people.
///
/// A size of zero is treated as one (the applicant always counts).
pub fn fpl_for_household(size: u32) -> Decimal {
    let size = size.max(1) as usize;
    let amount = match FPL_TABLE.get(size - 1) {
        Some(amount) => *amount,
        None => FPL_TABLE[7] + FPL_PER_ADDITIONAL * (size as i64 - 8),
    };
    Decimal::from(amount)
}

/// Household income as a percentage of the FPL (e.g. `298.8` for 298.8%).
pub fn income_ratio(
    annual_income: Decimal,
    household_size: u32,
) -> Decimal {
    let fpl = fpl_for_household(household_size);
    (annual_income / fpl * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Buckets an income/FPL ratio into the three subsidy bands.
pub fn subsidy_level(
    annual_income: Decimal,
    household_size: u32,
) -> SubsidyLevel {
    let ratio = income_ratio(annual_income, household_size);
    if ratio <= Decimal::from(150) {
        SubsidyLevel::FullSubsidies
    } else if ratio <= Decimal::from(400) {
        SubsidyLevel::SomeSubsidies
    } else {
        SubsidyLevel::NoSubsidies
    }
}

/// Illustrative monthly subsidy savings, in whole dollars, for the
/// ratio tier the household falls in.
pub fn estimate_monthly_savings(
    annual_income: Decimal,
    household_size: u32,
) -> Decimal {
    let ratio = income_ratio(annual_income, household_size);
    let amount = if ratio < Decimal::from(150) {
        500
    } else if ratio < Decimal::from(200) {
        400
    } else if ratio < Decimal::from(250) {
        300
    } else if ratio < Decimal::from(400) {
        200
    } else {
        0
    };
    Decimal::from(amount)
}
