//! Current-regime vs flat-plan comparison

use crate::engine::result::{AlternativePlan, Comparison, CurrentTotal, PlanTier};
use crate::rates::RateTable;

/// Flat-plan tier: family pricing whenever a spouse or any adult child is
/// covered, single otherwise. Hypothetical dependents don't change the tier.
pub fn plan_tier(has_spouse: bool, adult_child_count: usize) -> PlanTier {
    if has_spouse || adult_child_count > 0 {
        PlanTier::Family
    } else {
        PlanTier::Single
    }
}

/// Price the alternative plan for a tier
pub fn alternative_plan(tier: PlanTier, rates: &RateTable) -> AlternativePlan {
    let monthly = match tier {
        PlanTier::Single => rates.flat_plan.single_monthly,
        PlanTier::Family => rates.flat_plan.family_monthly,
    };
    AlternativePlan {
        tier,
        monthly,
        yearly: monthly * 12,
    }
}

/// Build the current total from the yearly figure (monthly floors)
pub fn current_total(yearly: i64) -> CurrentTotal {
    CurrentTotal {
        yearly,
        monthly: yearly / 12,
    }
}

/// Signed difference and verdict.
///
/// The alternative counts as cheaper only on a strictly positive monthly
/// difference; breaking even is not a recommendation to switch.
pub fn compare(current: CurrentTotal, plan: AlternativePlan) -> Comparison {
    let difference_monthly = current.monthly - plan.monthly;
    Comparison {
        difference_monthly,
        difference_yearly: current.yearly - plan.yearly,
        alternative_is_cheaper: difference_monthly > 0,
    }
}
