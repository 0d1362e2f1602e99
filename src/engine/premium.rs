//! Household premium calculator
//!
//! Computes the three health-insurance sub-premiums (medical, elder support,
//! nursing care) from the household aggregate taxable base, applies the
//! statutory reduction tier, and enforces the per-category and aggregate caps.

use crate::engine::floor_yen;
use crate::engine::result::PremiumBreakdown;
use crate::rates::{CategoryRates, RateTable};
use serde::{Deserialize, Serialize};

/// Member-count step widening the 50%-reduction threshold, per member, in yen
pub const REDUCTION_STEP_HALF: i64 = 295_000;
/// Member-count step widening the 20%-reduction threshold, per member, in yen
pub const REDUCTION_STEP_LIGHT: i64 = 545_000;

/// Statutory premium reduction tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReductionTier {
    /// 70% reduction (premium multiplied by 0.3)
    Deep,
    /// 50% reduction
    Half,
    /// 20% reduction
    Light,
    /// No reduction
    None,
}

impl ReductionTier {
    /// Fraction of the full premium actually charged
    pub fn multiplier(&self) -> f64 {
        match self {
            ReductionTier::Deep => 0.3,
            ReductionTier::Half => 0.5,
            ReductionTier::Light => 0.8,
            ReductionTier::None => 1.0,
        }
    }

    /// Apply the reduction to a yen amount, flooring the result
    pub fn apply(&self, amount: i64) -> i64 {
        floor_yen(amount as f64 * self.multiplier())
    }
}

/// Determine the reduction tier for a test income and member count.
///
/// Thresholds are tested in ascending order so the lowest income gets the
/// deepest reduction; the base threshold is not scaled by member count, the
/// two upper thresholds widen per member.
pub fn reduction_tier(test_income: i64, member_count: u32, basic_deduction_resident: i64) -> ReductionTier {
    let members = member_count as i64;
    if test_income <= basic_deduction_resident {
        ReductionTier::Deep
    } else if test_income <= basic_deduction_resident + REDUCTION_STEP_HALF * members {
        ReductionTier::Half
    } else if test_income <= basic_deduction_resident + REDUCTION_STEP_LIGHT * members {
        ReductionTier::Light
    } else {
        ReductionTier::None
    }
}

/// Income and per-capita components of one category, before reduction
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryComponents {
    /// floor(aggregate base x income rate)
    pub income: i64,
    /// per-capita rate x covered count
    pub capita: i64,
    /// min(income + capita, category cap)
    pub capped: i64,
}

impl CategoryComponents {
    fn compute(rates: &CategoryRates, aggregate_base: i64, covered_count: u32) -> Self {
        if covered_count == 0 {
            return Self::default();
        }
        let income = floor_yen(aggregate_base as f64 * rates.income_rate);
        let capita = rates.per_capita * covered_count as i64;
        Self {
            income,
            capita,
            capped: (income + capita).min(rates.cap),
        }
    }
}

/// Household premium with the intermediates the allocator needs
#[derive(Debug, Clone)]
pub struct HouseholdPremium {
    pub medical: CategoryComponents,
    pub support: CategoryComponents,
    pub nursing: CategoryComponents,
    pub tier: ReductionTier,
    /// Reduced, capped category amounts; `total` honors the aggregate cap
    pub breakdown: PremiumBreakdown,
}

/// Compute the household health-insurance premium.
///
/// Steps, in order: per-category income + per-capita components, per-category
/// cap, reduction tier from the test income, uniform reduction of every
/// category, aggregate cap on the sum. When the aggregate cap binds, the
/// overflow is taken out of the categories in medical, support, nursing order
/// so the breakdown still sums to its total.
pub fn household_premium(
    aggregate_base: i64,
    member_count: u32,
    care_eligible_count: u32,
    reduction_test_income: i64,
    rates: &RateTable,
) -> HouseholdPremium {
    let medical = CategoryComponents::compute(&rates.medical, aggregate_base, member_count);
    let support = CategoryComponents::compute(&rates.support, aggregate_base, member_count);
    // Nursing covers only members aged 40-64; zero eligible means the
    // category is skipped entirely
    let nursing = CategoryComponents::compute(&rates.nursing, aggregate_base, care_eligible_count);

    let tier = reduction_tier(reduction_test_income, member_count, rates.basic_deduction_resident);

    let mut reduced = [
        tier.apply(medical.capped),
        tier.apply(support.capped),
        tier.apply(nursing.capped),
    ];

    let sum: i64 = reduced.iter().sum();
    if sum > rates.aggregate_cap {
        let mut overflow = sum - rates.aggregate_cap;
        for amount in reduced.iter_mut() {
            let cut = overflow.min(*amount);
            *amount -= cut;
            overflow -= cut;
            if overflow == 0 {
                break;
            }
        }
    }

    HouseholdPremium {
        medical,
        support,
        nursing,
        tier,
        breakdown: PremiumBreakdown::new(reduced[0], reduced[1], reduced[2]),
    }
}
