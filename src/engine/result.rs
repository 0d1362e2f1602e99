//! Result snapshot returned by one engine invocation
//!
//! Every struct here is a plain value: the engine builds a fresh snapshot per
//! call and never mutates or shares one across calls.

use crate::engine::premium::ReductionTier;
use crate::household::{PersonRole, SpouseRangeCheck};
use serde::{Deserialize, Serialize};

/// Medical / support / nursing sub-premiums with their sum
///
/// `total` always equals the sum of the three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub medical: i64,
    pub support: i64,
    pub nursing: i64,
    pub total: i64,
}

impl PremiumBreakdown {
    pub fn new(medical: i64, support: i64, nursing: i64) -> Self {
        Self {
            medical,
            support,
            nursing,
            total: medical + support + nursing,
        }
    }
}

/// One member's share of the household health-insurance premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPremium {
    pub role: PersonRole,
    pub age: u8,
    /// This member's own post-deduction taxable base
    pub taxable_base: i64,
    pub breakdown: PremiumBreakdown,
}

/// Household health-insurance premium with its per-member apportionment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsurance {
    pub yearly: i64,
    pub monthly: i64,
    pub breakdown: PremiumBreakdown,
    /// Primary filer first; the sum of member totals equals `breakdown.total`
    pub per_person: Vec<PersonPremium>,
}

/// National pension across all liable members (ages 20-59)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pension {
    pub yearly: i64,
    pub monthly: i64,
    pub payer_count: u32,
}

/// Whether one member owes the over-65 long-term-care levy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LtcFlag {
    pub role: PersonRole,
    pub age: u8,
    pub liable: bool,
}

/// Long-term-care levy for members aged 65+
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongTermCare65 {
    pub yearly: i64,
    pub per_person: Vec<LtcFlag>,
}

/// Estimated stand-alone premium for one hypothetical dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentEstimate {
    pub role: PersonRole,
    pub age: u8,
    pub annual_income_yen: i64,
    /// Estimated current yearly cost, using the simplified single-person formula
    pub yearly: i64,
}

/// Total savings achievable by folding dependents into the flat plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentSavings {
    pub total_yearly: i64,
    pub monthly: i64,
    pub per_dependent: Vec<DependentEstimate>,
}

/// Current-regime total across all premium kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTotal {
    pub yearly: i64,
    pub monthly: i64,
}

/// Flat-plan pricing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanTier {
    Single,
    Family,
}

/// The flat-rate alternative plan priced for this household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativePlan {
    pub tier: PlanTier,
    pub monthly: i64,
    pub yearly: i64,
}

/// Signed differences and the recommendation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Current monthly total minus flat-plan monthly price
    pub difference_monthly: i64,
    pub difference_yearly: i64,
    /// True only when the flat plan is strictly cheaper
    pub alternative_is_cheaper: bool,
}

/// Intermediate figures exposed for the calculation-details view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcDetails {
    pub member_count: u32,
    pub care_eligible_count: u32,
    /// Return deduction actually applied to the primary filer, in yen
    pub return_deduction: i64,
    pub filer_taxable_base: i64,
    pub household_taxable_base: i64,
    pub reduction: ReductionTier,
    pub spouse_range: Option<SpouseRangeCheck>,
}

/// Full immutable result snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdResult {
    pub health_insurance: HealthInsurance,
    pub pension: Pension,
    pub long_term_care: LongTermCare65,
    /// Present only when the household opted to model dependents
    pub dependent_savings: Option<DependentSavings>,
    pub current_total: CurrentTotal,
    pub alternative_plan: AlternativePlan,
    pub comparison: Comparison,
    pub details: CalcDetails,
}
