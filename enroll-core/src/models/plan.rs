use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marketplace metal tier. Used as a static label on the catalog, not
/// actuarially derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalLevel {
    Bronze,
    Silver,
    Gold,
}

impl MetalLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

/// One entry of the static plan catalog. Serialized for display and
/// logging only; the catalog itself is compiled in, never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub id: &'static str,
    pub name: &'static str,
    pub carrier: &'static str,
    pub metal_level: MetalLevel,
    /// Unadjusted monthly rate before age/state/risk/income factors.
    pub base_monthly_rate: Decimal,
    pub annual_deductible: Decimal,
    pub features: &'static [&'static str],
}

/// A catalog plan priced for one worker profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub plan: InsurancePlan,
    /// Premium after every factor and the budget nudge.
    pub monthly_premium: Decimal,
    /// Premium before the budget nudge, for the savings line.
    pub original_premium: Decimal,
    pub monthly_savings: Decimal,
    pub annual_savings: Decimal,
    /// Estimated annual self-employed-premium deduction.
    pub tax_deduction: Decimal,
    /// Monthly premium net of the deduction, the ranking key.
    pub effective_monthly_rate: Decimal,
}
