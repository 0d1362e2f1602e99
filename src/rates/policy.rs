//! Calculation policy variants
//!
//! The published guidance is ambiguous on two points, and municipal
//! calculators genuinely disagree: whether the reduction-tier test looks at
//! the filer's income alone or the combined household income, and whether the
//! household premium is apportioned back to members by income share or split
//! evenly. Both choices are explicit configuration here rather than a single
//! baked-in interpretation.

use serde::{Deserialize, Serialize};

/// Income figure the reduction-tier test compares against its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReductionBasis {
    /// Filer income after the return deduction, plus the spouse's
    /// graduated-deduction-adjusted income when present
    HouseholdIncome,
    /// Filer income after the return deduction, alone
    FilerIncome,
}

/// How the household premium is apportioned onto individual members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMethod {
    /// Income-linked portion proportional to each member's share of the
    /// aggregate taxable base; per-capita portion split per head
    IncomeShare,
    /// Every category split evenly across members
    EqualSplit,
}

/// Selected policy interpretation for one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcPolicy {
    #[serde(default = "default_reduction_basis")]
    pub reduction_basis: ReductionBasis,

    #[serde(default = "default_allocation")]
    pub allocation: AllocationMethod,
}

fn default_reduction_basis() -> ReductionBasis {
    ReductionBasis::HouseholdIncome
}

fn default_allocation() -> AllocationMethod {
    AllocationMethod::IncomeShare
}

impl Default for CalcPolicy {
    fn default() -> Self {
        Self {
            reduction_basis: ReductionBasis::HouseholdIncome,
            allocation: AllocationMethod::IncomeShare,
        }
    }
}
