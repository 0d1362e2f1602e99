//! Kokuho Compare - premium comparison engine for self-employed households
//!
//! This library provides:
//! - National health insurance premiums (medical, support, nursing categories)
//! - Statutory low-income reduction tiers and per-category caps
//! - National pension and over-65 long-term-care add-ons
//! - Dependent-relative savings estimates
//! - Side-by-side comparison against a flat-rate alternative plan

pub mod engine;
pub mod error;
pub mod household;
pub mod rates;

// Re-export commonly used types
pub use engine::{calculate, HouseholdResult, PlanTier, PremiumBreakdown, ReductionTier};
pub use error::CalcError;
pub use household::{HouseholdInput, PersonInput, PersonRole, ReturnType};
pub use rates::{AllocationMethod, CalcPolicy, RateTable, ReductionBasis};
