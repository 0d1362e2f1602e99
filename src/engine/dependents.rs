//! Dependent-relative savings estimator
//!
//! For each hypothetical dependent the household could fold into the flat
//! plan's free coverage, estimate what that person currently pays on their
//! own. The health-insurance part uses a single blended rate rather than the
//! full three-category computation: this is a deliberate approximation for
//! people outside the household whose municipality is unknown. Persons 75 and
//! over fall under the elder-care regime and are skipped entirely.

use crate::engine::addons::{care_over65_liable, pension_liable};
use crate::engine::floor_yen;
use crate::engine::premium::reduction_tier;
use crate::engine::result::{DependentEstimate, DependentSavings};
use crate::household::PersonInput;
use crate::rates::RateTable;

/// Age at which the elder-care insurance regime takes over (not modeled)
pub const ELDER_CARE_AGE: u8 = 75;

/// Estimate one dependent's current stand-alone yearly cost.
///
/// Returns `None` for persons 75+.
pub fn estimate_dependent(person: &PersonInput, rates: &RateTable) -> Option<DependentEstimate> {
    if person.age >= ELDER_CARE_AGE {
        return None;
    }

    let base = (person.annual_income_yen - rates.basic_deduction_income_tax).max(0);

    let mut health =
        floor_yen(base as f64 * rates.dependent_estimate.income_rate) + rates.dependent_estimate.per_capita;
    if person.care_eligible() {
        health += floor_yen(base as f64 * rates.nursing.income_rate) + rates.nursing.per_capita;
    }

    // Single-person reduction test: thresholds at household size 1, against
    // the gross income rather than the deducted base
    let tier = reduction_tier(person.annual_income_yen, 1, rates.basic_deduction_resident);
    health = tier.apply(health);

    let pension = if pension_liable(person.age) {
        rates.pension_monthly * 12
    } else {
        0
    };
    let care = if care_over65_liable(person.age) {
        rates.care_over65_yearly
    } else {
        0
    };

    Some(DependentEstimate {
        role: person.role,
        age: person.age,
        annual_income_yen: person.annual_income_yen,
        yearly: health + pension + care,
    })
}

/// Estimate every dependent and sum the achievable savings
pub fn dependent_savings(dependents: &[PersonInput], rates: &RateTable) -> DependentSavings {
    let per_dependent: Vec<DependentEstimate> = dependents
        .iter()
        .filter_map(|p| estimate_dependent(p, rates))
        .collect();
    let total_yearly: i64 = per_dependent.iter().map(|d| d.yearly).sum();
    DependentSavings {
        total_yearly,
        monthly: total_yearly / 12,
        per_dependent,
    }
}
