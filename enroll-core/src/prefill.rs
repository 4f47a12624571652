//! Demo pre-fill helpers.
//!
//! `suggest_weekly_income` picks a plausible weekly income for the
//! quote teaser. This is UX sugar, not business logic: the value is
//! random within a per-work-type band. Callers inject the RNG, so a
//! seeded generator makes the suggestion reproducible in tests.

use rand::Rng;
use rust_decimal::Decimal;

use crate::models::WorkType;

/// Plausible weekly income band, in whole dollars, per work type.
fn income_band(work_type: WorkType) -> (i64, i64) {
    match work_type {
        WorkType::Rideshare => (600, 1400),
        WorkType::Delivery => (500, 1100),
        WorkType::Freelance => (700, 2000),
        WorkType::Contractor => (900, 2200),
        WorkType::Creator => (400, 1800),
        WorkType::SmallBusiness => (800, 2500),
        WorkType::Other => (500, 1500),
    }
}

/// A plausible weekly income for the given line of work, drawn from
/// the injected RNG.
pub fn suggest_weekly_income<R: Rng + ?Sized>(
    rng: &mut R,
    work_type: WorkType,
) -> Decimal {
    let (low, high) = income_band(work_type);
    Decimal::from(rng.random_range(low..=high))
}
