//! Published premium rates, deduction thresholds, caps, and flat-plan prices
//!
//! One `RateTable` holds everything a computation needs for a given fiscal
//! year and region. Swapping the table changes every computed amount without
//! touching engine logic.

use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// Income-linked rate, per-capita levy, and yearly cap for one premium category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRates {
    /// Rate applied to the household taxable base (0.0 to 1.0)
    pub income_rate: f64,
    /// Flat yearly amount per covered member, in yen
    pub per_capita: i64,
    /// Yearly cap for this category, in yen
    pub cap: i64,
}

/// Blended single-person rates used by the dependent savings estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependentEstimateRates {
    /// Single blended income rate (approximates medical + support combined)
    pub income_rate: f64,
    /// Flat yearly per-person amount, in yen
    pub per_capita: i64,
}

/// Monthly prices of the flat-rate alternative plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatPlanPrices {
    pub single_monthly: i64,
    pub family_monthly: i64,
}

/// Full rate configuration for one fiscal year and region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub fiscal_year: u16,
    pub region: String,

    /// National pension premium, monthly, in yen
    pub pension_monthly: i64,

    /// Long-term-care premium for insured persons 65+, yearly, in yen
    pub care_over65_yearly: i64,

    /// Basic deduction on the income-tax base (taxable-base computation)
    pub basic_deduction_income_tax: i64,

    /// Basic deduction on the resident-tax base (reduction-tier test)
    pub basic_deduction_resident: i64,

    pub medical: CategoryRates,
    pub support: CategoryRates,
    pub nursing: CategoryRates,

    /// Cap on the combined medical + support + nursing yearly premium
    pub aggregate_cap: i64,

    pub dependent_estimate: DependentEstimateRates,

    pub flat_plan: FlatPlanPrices,
}

impl Default for RateTable {
    /// 2025 fiscal year, Tokyo Katsushika ward (highest rates in the capital)
    fn default() -> Self {
        Self {
            fiscal_year: 2025,
            region: "Tokyo Katsushika".to_string(),
            pension_monthly: 17_510,
            care_over65_yearly: 85_000, // national average, rounded
            basic_deduction_income_tax: 480_000,
            basic_deduction_resident: 430_000,
            medical: CategoryRates {
                income_rate: 0.0869,
                per_capita: 49_100,
                cap: 650_000,
            },
            support: CategoryRates {
                income_rate: 0.0280,
                per_capita: 16_500,
                cap: 240_000,
            },
            nursing: CategoryRates {
                income_rate: 0.0236,
                per_capita: 16_500,
                cap: 170_000,
            },
            aggregate_cap: 1_060_000,
            dependent_estimate: DependentEstimateRates {
                income_rate: 0.1074,
                per_capita: 91_500,
            },
            flat_plan: FlatPlanPrices {
                single_monthly: 38_500,
                family_monthly: 40_000,
            },
        }
    }
}

impl RateTable {
    /// Check table invariants: rates within [0, 1], money non-negative.
    ///
    /// Called once at the engine boundary before any arithmetic runs.
    pub fn validate(&self) -> Result<(), CalcError> {
        let rate_fields = [
            ("medical.income_rate", self.medical.income_rate),
            ("support.income_rate", self.support.income_rate),
            ("nursing.income_rate", self.nursing.income_rate),
            (
                "dependent_estimate.income_rate",
                self.dependent_estimate.income_rate,
            ),
        ];
        for (name, rate) in rate_fields {
            if !(0.0..=1.0).contains(&rate) || !rate.is_finite() {
                return Err(CalcError::InvalidRateTable(format!(
                    "{} out of range: {}",
                    name, rate
                )));
            }
        }

        let money_fields = [
            ("pension_monthly", self.pension_monthly),
            ("care_over65_yearly", self.care_over65_yearly),
            ("basic_deduction_income_tax", self.basic_deduction_income_tax),
            ("basic_deduction_resident", self.basic_deduction_resident),
            ("medical.per_capita", self.medical.per_capita),
            ("medical.cap", self.medical.cap),
            ("support.per_capita", self.support.per_capita),
            ("support.cap", self.support.cap),
            ("nursing.per_capita", self.nursing.per_capita),
            ("nursing.cap", self.nursing.cap),
            ("aggregate_cap", self.aggregate_cap),
            (
                "dependent_estimate.per_capita",
                self.dependent_estimate.per_capita,
            ),
            ("flat_plan.single_monthly", self.flat_plan.single_monthly),
            ("flat_plan.family_monthly", self.flat_plan.family_monthly),
        ];
        for (name, amount) in money_fields {
            if amount < 0 {
                return Err(CalcError::InvalidRateTable(format!(
                    "{} is negative: {}",
                    name, amount
                )));
            }
        }

        Ok(())
    }
}
