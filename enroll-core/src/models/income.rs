use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::fpl::SubsidyLevel;

/// How the applicant (or their spouse) earns their living.
///
/// The variants double as keys into the quoting tables: each work type
/// carries a typical-age estimate (used when no date of birth is known
/// yet) and a risk multiplier applied to the base premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    Rideshare,
    Delivery,
    Freelance,
    Contractor,
    Creator,
    SmallBusiness,
    Other,
}

impl WorkType {
    pub const ALL: [WorkType; 7] = [
        Self::Rideshare,
        Self::Delivery,
        Self::Freelance,
        Self::Contractor,
        Self::Creator,
        Self::SmallBusiness,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rideshare => "Rideshare driver",
            Self::Delivery => "Delivery courier",
            Self::Freelance => "Freelancer",
            Self::Contractor => "Independent contractor",
            Self::Creator => "Content creator",
            Self::SmallBusiness => "Small business owner",
            Self::Other => "Other independent work",
        }
    }

    /// Typical applicant age for this line of work, used by the quote
    /// generator when the profile carries no age.
    pub fn typical_age(&self) -> u32 {
        match self {
            Self::Rideshare => 38,
            Self::Delivery => 29,
            Self::Freelance => 32,
            Self::Contractor => 41,
            Self::Creator => 27,
            Self::SmallBusiness => 45,
            Self::Other => 35,
        }
    }

    /// Premium multiplier for occupational risk. 1.0 is the baseline.
    pub fn risk_multiplier(&self) -> Decimal {
        match self {
            Self::Rideshare => Decimal::new(115, 2),
            Self::Delivery => Decimal::new(110, 2),
            Self::Freelance => Decimal::ONE,
            Self::Contractor => Decimal::new(108, 2),
            Self::Creator => Decimal::new(95, 2),
            Self::SmallBusiness => Decimal::new(105, 2),
            Self::Other => Decimal::ONE,
        }
    }
}

/// Income slice of the application.
///
/// When `is_dual_income` is set, `primary_income_amount` and
/// `spouse_income_amount` must sum to `total_annual_income`. That
/// invariant is maintained by [`IncomeData::redistribute`], which every
/// income mutation should be followed by; it is not enforced
/// structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeData {
    pub total_annual_income: Decimal,
    pub current_range: Option<SubsidyLevel>,
    pub primary_income_type: Option<WorkType>,
    pub primary_income_description: String,
    pub is_dual_income: bool,
    pub primary_income_amount: Decimal,
    pub spouse_income_amount: Decimal,
    pub spouse_income_type: Option<WorkType>,
    pub spouse_income_description: String,
}

impl Default for IncomeData {
    fn default() -> Self {
        Self {
            total_annual_income: Decimal::ZERO,
            current_range: None,
            primary_income_type: None,
            primary_income_description: String::new(),
            is_dual_income: false,
            primary_income_amount: Decimal::ZERO,
            spouse_income_amount: Decimal::ZERO,
            spouse_income_type: None,
            spouse_income_description: String::new(),
        }
    }
}

/// Primary earner's share of a dual income when no prior split exists.
const DEFAULT_PRIMARY_SHARE: Decimal = Decimal::from_parts(6, 0, 0, false, 1); // 0.6

impl IncomeData {
    /// Re-splits `total_annual_income` across the two earners.
    ///
    /// The current primary/spouse ratio is preserved when one exists,
    /// otherwise a 60/40 split is applied. The spouse share is always
    /// computed by subtraction so the two parts sum to the total exactly,
    /// with no independent rounding. Single-income applications get the
    /// whole total as primary income.
    pub fn redistribute(&mut self) {
        if self.total_annual_income < Decimal::ZERO {
            self.total_annual_income = Decimal::ZERO;
        }

        if !self.is_dual_income {
            self.primary_income_amount = self.total_annual_income;
            self.spouse_income_amount = Decimal::ZERO;
            return;
        }

        let prior_sum = self.primary_income_amount + self.spouse_income_amount;
        let share = if prior_sum > Decimal::ZERO && self.primary_income_amount >= Decimal::ZERO {
            self.primary_income_amount / prior_sum
        } else {
            DEFAULT_PRIMARY_SHARE
        };

        let primary = (self.total_annual_income * share).round_dp(2);
        self.primary_income_amount = primary;
        self.spouse_income_amount = self.total_annual_income - primary;
    }

    /// Sets the primary earner's amount directly, pulling the spouse
    /// amount along so the dual-income invariant keeps holding.
    pub fn set_primary_amount(&mut self, amount: Decimal) {
        let amount = amount.max(Decimal::ZERO).min(self.total_annual_income);
        self.primary_income_amount = amount;
        if self.is_dual_income {
            self.spouse_income_amount = self.total_annual_income - amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn dual_income(total: Decimal) -> IncomeData {
        IncomeData {
            total_annual_income: total,
            is_dual_income: true,
            ..IncomeData::default()
        }
    }

    #[test]
    fn default_primary_share_is_sixty_percent() {
        assert_eq!(DEFAULT_PRIMARY_SHARE, dec!(0.6));
    }

    #[test]
    fn redistribute_splits_fresh_dual_income_sixty_forty() {
        let mut income = dual_income(dec!(50000));

        income.redistribute();

        assert_eq!(income.primary_income_amount, dec!(30000));
        assert_eq!(income.spouse_income_amount, dec!(20000));
    }

    #[test]
    fn redistribute_preserves_existing_ratio() {
        let mut income = dual_income(dec!(40000));
        income.primary_income_amount = dec!(30000);
        income.spouse_income_amount = dec!(10000);

        income.total_annual_income = dec!(80000);
        income.redistribute();

        assert_eq!(income.primary_income_amount, dec!(60000));
        assert_eq!(income.spouse_income_amount, dec!(20000));
    }

    #[test]
    fn parts_always_sum_to_total() {
        // Awkward totals that do not divide evenly at the default split.
        for total in ["1", "3", "77777", "45000.33", "999999.99", "0"] {
            let mut income = dual_income(total.parse().unwrap());
            income.redistribute();

            assert_eq!(
                income.primary_income_amount + income.spouse_income_amount,
                income.total_annual_income,
                "total {total}"
            );
        }
    }

    #[test]
    fn single_income_collapses_to_primary() {
        let mut income = IncomeData {
            total_annual_income: dec!(42000),
            is_dual_income: false,
            spouse_income_amount: dec!(5000),
            ..IncomeData::default()
        };

        income.redistribute();

        assert_eq!(income.primary_income_amount, dec!(42000));
        assert_eq!(income.spouse_income_amount, dec!(0));
    }

    #[test]
    fn negative_total_is_clamped_to_zero() {
        let mut income = dual_income(dec!(-100));

        income.redistribute();

        assert_eq!(income.total_annual_income, dec!(0));
        assert_eq!(income.primary_income_amount, dec!(0));
        assert_eq!(income.spouse_income_amount, dec!(0));
    }

    #[test]
    fn set_primary_amount_keeps_invariant() {
        let mut income = dual_income(dec!(60000));
        income.redistribute();

        income.set_primary_amount(dec!(45000));

        assert_eq!(income.primary_income_amount, dec!(45000));
        assert_eq!(income.spouse_income_amount, dec!(15000));
    }

    #[test]
    fn set_primary_amount_clamps_to_total() {
        let mut income = dual_income(dec!(60000));

        income.set_primary_amount(dec!(90000));

        assert_eq!(income.primary_income_amount, dec!(60000));
        assert_eq!(income.spouse_income_amount, dec!(0));
    }
}
