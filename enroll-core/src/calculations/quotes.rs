//! Quote generation over the static plan catalog.
//!
//! `generate_quotes` is a pure function from a worker profile to three
//! priced plans. Premiums start from each plan's base monthly rate and
//! are scaled by an age factor, a state factor, an occupational risk
//! multiplier and an income-tier discount, with a flat 5% nudge when the
//! result overshoots the applicant's stated budget. No I/O, no
//! randomness; equal inputs always produce equal output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{clamp, round_half_up};
use crate::models::{InsurancePlan, MetalLevel, QuoteResult, WorkType};

/// Errors that can occur while generating quotes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// Weekly income was negative.
    #[error("weekly income cannot be negative: {0}")]
    NegativeIncome(Decimal),
}

/// Everything the generator needs to price the catalog for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub weekly_income: Decimal,
    /// Two-letter state code; unknown states rate at the 1.0 baseline.
    pub state: String,
    pub work_type: WorkType,
    /// When absent, the work type's typical age is assumed.
    pub age: Option<u32>,
    /// Monthly amount the applicant said they can spend, if any.
    pub budget_ceiling: Option<Decimal>,
}

/// Annualization convention for weekly income.
const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

const BUDGET_NUDGE: Decimal = Decimal::from_parts(95, 0, 0, false, 2); // 0.95

const AGE_FACTOR_FLOOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1); // 0.8
const AGE_FACTOR_CEIL: Decimal = Decimal::from_parts(2, 0, 0, false, 0); // 2.0
const AGE_FACTOR_PIVOT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The three plan templates offered to every applicant.
pub fn plan_catalog() -> [InsurancePlan; 3] {
    [
        InsurancePlan {
            id: "bronze-secure",
            name: "SecureStart Bronze",
            carrier: "Meridian Health",
            metal_level: MetalLevel::Bronze,
            base_monthly_rate: Decimal::from(285),
            annual_deductible: Decimal::from(7500),
            features: &[
                "Free preventive care",
                "Telehealth visits included",
                "Nationwide urgent-care network",
            ],
        },
        InsurancePlan {
            id: "silver-flex",
            name: "FlexCare Silver",
            carrier: "Pinnacle Mutual",
            metal_level: MetalLevel::Silver,
            base_monthly_rate: Decimal::from(345),
            annual_deductible: Decimal::from(4500),
            features: &[
                "Free preventive care",
                "Low-copay primary visits",
                "Prescription coverage",
                "Telehealth visits included",
            ],
        },
        InsurancePlan {
            id: "gold-complete",
            name: "CompleteCare Gold",
            carrier: "Atlas Benefits",
            metal_level: MetalLevel::Gold,
            base_monthly_rate: Decimal::from(425),
            annual_deductible: Decimal::from(1500),
            features: &[
                "Free preventive care",
                "Low deductible",
                "Specialist visits covered",
                "Prescription coverage",
                "Mental-health services",
            ],
        },
    ]
}

/// Looks up a catalog plan by id.
pub fn plan_by_id(id: &str) -> Option<InsurancePlan> {
    plan_catalog().into_iter().find(|p| p.id == id)
}

/// Premium multiplier for the applicant's age: `clamp(age/30, 0.8, 2.0)`.
fn age_factor(age: u32) -> Decimal {
    clamp(
        Decimal::from(age) / AGE_FACTOR_PIVOT,
        AGE_FACTOR_FLOOR,
        AGE_FACTOR_CEIL,
    )
}

/// State rating factor; unlisted states rate at the 1.0 baseline.
fn state_factor(state: &str) -> Decimal {
    match state.trim().to_ascii_uppercase().as_str() {
        "NY" => Decimal::new(122, 2),
        "CA" => Decimal::new(118, 2),
        "WA" => Decimal::new(110, 2),
        "IL" => Decimal::new(106, 2),
        "FL" => Decimal::new(105, 2),
        "PA" => Decimal::new(104, 2),
        "GA" => Decimal::new(103, 2),
        "TX" => Decimal::new(102, 2),
        "NC" => Decimal::new(101, 2),
        "AZ" => Decimal::new(98, 2),
        _ => Decimal::ONE,
    }
}

/// Tiered discount by annual income. Non-decreasing in income: lower
/// earners always get at least as deep a discount.
fn income_discount(annual_income: Decimal) -> Decimal {
    if annual_income < Decimal::from(30_000) {
        Decimal::new(85, 2)
    } else if annual_income < Decimal::from(50_000) {
        Decimal::new(92, 2)
    } else if annual_income < Decimal::from(75_000) {
        Decimal::new(98, 2)
    } else {
        Decimal::ONE
    }
}

/// Rate of the self-employed premium deduction by annual income.
fn deduction_rate(annual_income: Decimal) -> Decimal {
    if annual_income > Decimal::from(50_000) {
        Decimal::new(22, 2)
    } else {
        Decimal::new(12, 2)
    }
}

/// Prices the full catalog for `profile`, cheapest effective rate first.
///
/// # Errors
///
/// Returns [`QuoteError::NegativeIncome`] when the stated weekly income
/// is below zero. Zero income is accepted and rates in the lowest tier.
pub fn generate_quotes(profile: &WorkerProfile) -> Result<Vec<QuoteResult>, QuoteError> {
    if profile.weekly_income < Decimal::ZERO {
        return Err(QuoteError::NegativeIncome(profile.weekly_income));
    }

    let age = profile.age.unwrap_or_else(|| profile.work_type.typical_age());
    let annual_income = profile.weekly_income * WEEKS_PER_YEAR;

    let age_factor = age_factor(age);
    let state_factor = state_factor(&profile.state);
    let risk = profile.work_type.risk_multiplier();
    let discount = income_discount(annual_income);
    let deduction_rate = deduction_rate(annual_income);

    let mut results: Vec<QuoteResult> = plan_catalog()
        .into_iter()
        .map(|plan| {
            let original =
                round_half_up(plan.base_monthly_rate * age_factor * state_factor * risk * discount);

            let over_budget = profile
                .budget_ceiling
                .is_some_and(|ceiling| original > ceiling);
            let premium = if over_budget {
                round_half_up(original * BUDGET_NUDGE)
            } else {
                original
            };

            let monthly_savings = (original - premium).max(Decimal::ZERO);
            let annual_premium = premium * Decimal::from(12);
            let tax_deduction = round_half_up(annual_premium * deduction_rate);
            let effective_monthly_rate =
                round_half_up(premium - tax_deduction / Decimal::from(12));

            QuoteResult {
                plan,
                monthly_premium: premium,
                original_premium: original,
                monthly_savings,
                annual_savings: monthly_savings * Decimal::from(12),
                tax_deduction,
                effective_monthly_rate,
            }
        })
        .collect();

    results.sort_by(|a, b| a.effective_monthly_rate.cmp(&b.effective_monthly_rate));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn profile() -> WorkerProfile {
        WorkerProfile {
            weekly_income: dec!(900),
            state: "FL".to_string(),
            work_type: WorkType::Rideshare,
            age: Some(30),
            budget_ceiling: None,
        }
    }

    #[test]
    fn returns_all_three_plans_sorted_by_effective_rate() {
        let quotes = generate_quotes(&profile()).unwrap();

        assert_eq!(quotes.len(), 3);
        for pair in quotes.windows(2) {
            assert!(pair[0].effective_monthly_rate <= pair[1].effective_monthly_rate);
        }
    }

    #[test]
    fn quotes_are_deterministic() {
        let a = generate_quotes(&profile()).unwrap();
        let b = generate_quotes(&profile()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn bronze_premium_for_reference_profile() {
        // age 30 -> factor 1.0; FL -> 1.05; rideshare -> 1.15;
        // $900/week = $46,800/yr -> 0.92 discount.
        // 285 * 1.0 * 1.05 * 1.15 * 0.92 = 316.6065
        let quotes = generate_quotes(&profile()).unwrap();
        let bronze = quotes.iter().find(|q| q.plan.id == "bronze-secure").unwrap();

        assert_eq!(bronze.monthly_premium, dec!(316.61));
        assert_eq!(bronze.monthly_savings, dec!(0));
        // 46,800 <= 50,000 -> 12% rate: 316.61 * 12 * 0.12 = 455.9184
        assert_eq!(bronze.tax_deduction, dec!(455.92));
    }

    #[test]
    fn age_factor_is_clamped() {
        assert_eq!(age_factor(18), dec!(0.8));
        assert_eq!(age_factor(24), dec!(0.8));
        assert_eq!(age_factor(30), dec!(1));
        assert_eq!(age_factor(45), dec!(1.5));
        assert_eq!(age_factor(75), dec!(2.0));
    }

    #[test]
    fn unknown_state_rates_at_baseline() {
        assert_eq!(state_factor("WY"), dec!(1));
        assert_eq!(state_factor("fl"), dec!(1.05));
        assert_eq!(state_factor(" ny "), dec!(1.22));
    }

    #[test]
    fn missing_age_falls_back_to_work_type_typical_age() {
        let mut with_age = profile();
        with_age.age = Some(WorkType::Rideshare.typical_age());
        let mut without_age = profile();
        without_age.age = None;

        assert_eq!(
            generate_quotes(&with_age).unwrap(),
            generate_quotes(&without_age).unwrap()
        );
    }

    #[test]
    fn income_discount_is_non_decreasing_in_income() {
        let tiers = [
            dec!(0),
            dec!(29999),
            dec!(30000),
            dec!(49999),
            dec!(50000),
            dec!(74999),
            dec!(75000),
            dec!(200000),
        ];
        let mut last = Decimal::ZERO;
        for income in tiers {
            let multiplier = income_discount(income);
            assert!(
                multiplier >= last,
                "discount multiplier dropped at income {income}"
            );
            last = multiplier;
        }
    }

    #[test]
    fn budget_nudge_shaves_five_percent() {
        let mut p = profile();
        p.budget_ceiling = Some(dec!(300));

        let quotes = generate_quotes(&p).unwrap();
        let bronze = quotes.iter().find(|q| q.plan.id == "bronze-secure").unwrap();

        // 316.61 over the $300 ceiling -> x0.95 = 300.7795.
        assert_eq!(bronze.original_premium, dec!(316.61));
        assert_eq!(bronze.monthly_premium, dec!(300.78));
        assert_eq!(bronze.monthly_savings, dec!(15.83));
        assert_eq!(bronze.annual_savings, dec!(189.96));
    }

    #[test]
    fn generous_budget_leaves_premium_untouched() {
        let mut p = profile();
        p.budget_ceiling = Some(dec!(1000));

        let quotes = generate_quotes(&p).unwrap();
        for quote in quotes {
            assert_eq!(quote.monthly_premium, quote.original_premium);
            assert_eq!(quote.monthly_savings, dec!(0));
        }
    }

    #[test]
    fn high_earners_get_the_larger_deduction_rate() {
        let mut p = profile();
        p.weekly_income = dec!(2000); // $104k/yr -> 22% rate, no discount

        let quotes = generate_quotes(&p).unwrap();
        let gold = quotes.iter().find(|q| q.plan.id == "gold-complete").unwrap();

        // 425 * 1.0 * 1.05 * 1.15 = 513.1875 -> 513.19
        assert_eq!(gold.monthly_premium, dec!(513.19));
        // 513.19 * 12 * 0.22 = 1354.8216 -> 1354.82
        assert_eq!(gold.tax_deduction, dec!(1354.82));
    }

    #[test]
    fn negative_income_is_rejected() {
        let mut p = profile();
        p.weekly_income = dec!(-1);

        assert_eq!(
            generate_quotes(&p),
            Err(QuoteError::NegativeIncome(dec!(-1)))
        );
    }
}
