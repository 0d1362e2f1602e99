//! Per-person allocation of the household premium
//!
//! The statutory premium is levied on the household as a whole; this module
//! apportions it back onto individual members so each person's share can be
//! shown. Flooring at each member can leave yen behind against the household
//! figure, so an explicit reconciliation step pins the sum to the household
//! total, with the primary filer absorbing all rounding drift.

use crate::engine::floor_yen;
use crate::engine::premium::{CategoryComponents, HouseholdPremium};
use crate::engine::result::{PersonPremium, PremiumBreakdown};
use crate::household::PersonInput;
use crate::rates::AllocationMethod;

/// One member's allocation inputs: identity plus their own taxable base
#[derive(Debug, Clone, Copy)]
pub struct MemberShare<'a> {
    pub person: &'a PersonInput,
    pub taxable_base: i64,
}

/// Apportion the household premium across members and reconcile.
///
/// Members must be in household order with the primary filer first; the
/// returned vector preserves that order and its totals sum exactly to
/// `premium.breakdown.total`.
pub fn allocate(
    members: &[MemberShare<'_>],
    premium: &HouseholdPremium,
    aggregate_base: i64,
    care_eligible_count: u32,
    method: AllocationMethod,
) -> Vec<PersonPremium> {
    let member_count = members.len() as u32;
    let mut per_person: Vec<PersonPremium> = members
        .iter()
        .map(|share| {
            let breakdown = match method {
                AllocationMethod::IncomeShare => {
                    income_share_breakdown(share, premium, aggregate_base, member_count, care_eligible_count)
                }
                AllocationMethod::EqualSplit => {
                    equal_split_breakdown(share, premium, member_count, care_eligible_count)
                }
            };
            PersonPremium {
                role: share.person.role,
                age: share.person.age,
                taxable_base: share.taxable_base,
                breakdown,
            }
        })
        .collect();

    reconcile_to_primary(&mut per_person, premium.breakdown.total);
    per_person
}

/// Income-linked portion by base share, per-capita portion per head.
///
/// Each member's share is carved out of the final household category amount
/// (already capped and reduced), weighted by their raw income + per-capita
/// components against the category's raw sum. Weighting against the raw sum
/// keeps per-person amounts inside the household figure even when a cap
/// binds. The nursing category (income and per-capita alike) lands only on
/// care-eligible members.
fn income_share_breakdown(
    share: &MemberShare<'_>,
    premium: &HouseholdPremium,
    aggregate_base: i64,
    member_count: u32,
    care_eligible_count: u32,
) -> PremiumBreakdown {
    let ratio = if aggregate_base > 0 && share.taxable_base > 0 {
        share.taxable_base as f64 / aggregate_base as f64
    } else {
        0.0
    };

    let split = |final_amount: i64, components: &CategoryComponents, heads: u32| -> i64 {
        let raw_sum = components.income + components.capita;
        if raw_sum == 0 || final_amount == 0 {
            return 0;
        }
        let income = floor_yen(components.income as f64 * ratio);
        let capita = if heads > 0 {
            components.capita / heads as i64
        } else {
            0
        };
        floor_yen(final_amount as f64 * (income + capita) as f64 / raw_sum as f64)
    };

    let medical = split(premium.breakdown.medical, &premium.medical, member_count);
    let support = split(premium.breakdown.support, &premium.support, member_count);
    let nursing = if share.person.care_eligible() {
        split(premium.breakdown.nursing, &premium.nursing, care_eligible_count)
    } else {
        0
    };

    PremiumBreakdown::new(medical, support, nursing)
}

/// Simplified variant: the final household category amounts divided evenly
/// across all members (nursing across care-eligible members only)
fn equal_split_breakdown(
    share: &MemberShare<'_>,
    premium: &HouseholdPremium,
    member_count: u32,
    care_eligible_count: u32,
) -> PremiumBreakdown {
    let heads = member_count.max(1) as i64;
    let medical = premium.breakdown.medical / heads;
    let support = premium.breakdown.support / heads;
    let nursing = if share.person.care_eligible() && care_eligible_count > 0 {
        premium.breakdown.nursing / care_eligible_count as i64
    } else {
        0
    };
    PremiumBreakdown::new(medical, support, nursing)
}

/// Pin the per-person sum to the household total.
///
/// Per-member flooring leaves a small non-negative residue against the
/// household figure; it is added wholly to the primary filer's medical
/// component and total, guaranteeing the identity
/// `sum(per_person totals) == household total` by construction.
pub fn reconcile_to_primary(per_person: &mut [PersonPremium], household_total: i64) {
    let allocated: i64 = per_person.iter().map(|p| p.breakdown.total).sum();
    let delta = household_total - allocated;
    if let Some(primary) = per_person.first_mut() {
        primary.breakdown.medical += delta;
        primary.breakdown.total += delta;
    }
}
