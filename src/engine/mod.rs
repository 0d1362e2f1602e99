//! Calculation engine
//!
//! One synchronous pass over a household snapshot: deductions, household
//! premium, per-person allocation, age-gated add-ons, dependent savings, and
//! the flat-plan comparison, returned as a single immutable result. The
//! engine holds no state between invocations; identical inputs always produce
//! identical results.

pub mod addons;
pub mod allocation;
pub mod comparison;
pub mod deduction;
pub mod dependents;
pub mod premium;
mod result;

pub use premium::{HouseholdPremium, ReductionTier};
pub use result::{
    AlternativePlan, CalcDetails, Comparison, CurrentTotal, DependentEstimate, DependentSavings,
    HealthInsurance, HouseholdResult, LongTermCare65, LtcFlag, Pension, PersonPremium, PlanTier,
    PremiumBreakdown,
};

use crate::error::CalcError;
use crate::household::HouseholdInput;
use crate::rates::{CalcPolicy, RateTable, ReductionBasis};
use allocation::MemberShare;
use log::debug;

/// Floor a yen-valued float to a whole-yen integer
pub(crate) fn floor_yen(amount: f64) -> i64 {
    amount.floor() as i64
}

/// Run the full computation for one household snapshot.
///
/// Refuses to run when the primary filer's income is missing or non-positive;
/// validates the injected rate table before any arithmetic. Either a fully
/// populated result or an error comes back, never a partial snapshot.
pub fn calculate(
    input: &HouseholdInput,
    rates: &RateTable,
    policy: &CalcPolicy,
) -> Result<HouseholdResult, CalcError> {
    if input.primary.annual_income_yen <= 0 {
        return Err(CalcError::InvalidInput(
            "primary filer annual income must be positive".to_string(),
        ));
    }
    rates.validate()?;

    // Taxable bases per member; the household aggregate drives the
    // income-linked premium components
    let filer_after_return = deduction::filer_income_after_return(
        input.primary.annual_income_yen,
        input.files_tax_return,
        input.return_type,
    );
    let return_deduction = input.primary.annual_income_yen - filer_after_return;
    let member_bases: Vec<i64> = input
        .members()
        .enumerate()
        .map(|(i, person)| {
            if i == 0 {
                (filer_after_return - rates.basic_deduction_income_tax).max(0)
            } else {
                deduction::person_taxable_base(
                    person.annual_income_yen,
                    rates.basic_deduction_income_tax,
                )
            }
        })
        .collect();
    let aggregate_base: i64 = member_bases.iter().sum();
    let filer_base = member_bases[0];

    let member_count = input.member_count();
    let care_eligible_count = input.care_eligible_count();

    // Reduction-tier test income per the configured policy basis
    let spouse_adjusted = input
        .spouse
        .filter(|s| s.annual_income_yen > 0)
        .map(|s| deduction::adjusted_income(s.annual_income_yen))
        .unwrap_or(0);
    let reduction_test_income = match policy.reduction_basis {
        ReductionBasis::HouseholdIncome => filer_after_return + spouse_adjusted,
        ReductionBasis::FilerIncome => filer_after_return,
    };

    let premium = premium::household_premium(
        aggregate_base,
        member_count,
        care_eligible_count,
        reduction_test_income,
        rates,
    );
    debug!(
        "household base {} yen, {} members ({} care-eligible), tier {:?}",
        aggregate_base, member_count, care_eligible_count, premium.tier
    );

    let shares: Vec<MemberShare<'_>> = input
        .members()
        .zip(member_bases.iter())
        .map(|(person, &taxable_base)| MemberShare {
            person,
            taxable_base,
        })
        .collect();
    let per_person = allocation::allocate(
        &shares,
        &premium,
        aggregate_base,
        care_eligible_count,
        policy.allocation,
    );

    let health_insurance = HealthInsurance {
        yearly: premium.breakdown.total,
        monthly: premium.breakdown.total / 12,
        breakdown: premium.breakdown,
        per_person,
    };

    let pension = addons::pension_summary(input.members(), rates);
    let long_term_care = addons::long_term_care_summary(input.members(), rates);

    let dependent_savings = (input.model_dependents && !input.dependents.is_empty())
        .then(|| dependents::dependent_savings(&input.dependents, rates));

    let mut current_yearly = health_insurance.yearly + pension.yearly + long_term_care.yearly;
    if let Some(savings) = &dependent_savings {
        if savings.total_yearly > 0 {
            current_yearly += savings.total_yearly;
        }
    }
    let current_total = comparison::current_total(current_yearly);

    let tier = comparison::plan_tier(input.spouse.is_some(), input.adult_children.len());
    let alternative_plan = comparison::alternative_plan(tier, rates);
    let verdict = comparison::compare(current_total, alternative_plan);

    let result = HouseholdResult {
        health_insurance,
        pension,
        long_term_care,
        dependent_savings,
        current_total,
        alternative_plan,
        comparison: verdict,
        details: CalcDetails {
            member_count,
            care_eligible_count,
            return_deduction,
            filer_taxable_base: filer_base,
            household_taxable_base: aggregate_base,
            reduction: premium.tier,
            spouse_range: input.spouse_range_check(),
        },
    };

    verify(&result)?;
    Ok(result)
}

/// Boundary guard: an inconsistent snapshot becomes an error, never output
fn verify(result: &HouseholdResult) -> Result<(), CalcError> {
    let allocated: i64 = result
        .health_insurance
        .per_person
        .iter()
        .map(|p| p.breakdown.total)
        .sum();
    if allocated != result.health_insurance.breakdown.total {
        return Err(CalcError::ComputationFailed(format!(
            "per-person allocation {} does not reconcile to household total {}",
            allocated, result.health_insurance.breakdown.total
        )));
    }
    for person in &result.health_insurance.per_person {
        let b = person.breakdown;
        if b.medical < 0 || b.support < 0 || b.nursing < 0 || b.total < 0 {
            return Err(CalcError::ComputationFailed(format!(
                "negative per-person amount for {:?}",
                person.role
            )));
        }
    }

    let amounts = [
        result.health_insurance.breakdown.medical,
        result.health_insurance.breakdown.support,
        result.health_insurance.breakdown.nursing,
        result.health_insurance.yearly,
        result.pension.yearly,
        result.long_term_care.yearly,
        result.current_total.yearly,
        result.alternative_plan.yearly,
    ];
    if amounts.iter().any(|&a| a < 0) {
        return Err(CalcError::ComputationFailed(
            "negative premium amount".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{PersonInput, PersonRole, ReturnType};
    use crate::rates::AllocationMethod;

    fn single_filer(income: i64, age: u8, files: bool, return_type: ReturnType) -> HouseholdInput {
        HouseholdInput {
            primary: PersonInput::new(PersonRole::Primary, age, income),
            spouse: None,
            adult_children: vec![],
            files_tax_return: files,
            return_type,
            dependents: vec![],
            model_dependents: false,
        }
    }

    fn run(input: &HouseholdInput) -> HouseholdResult {
        calculate(input, &RateTable::default(), &CalcPolicy::default()).unwrap()
    }

    #[test]
    fn test_scenario_blue_return_filer() {
        // Income 3,000,000, age 40, blue-65: base 1,870,000, no reduction,
        // nursing applies (age 40-64)
        let input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        let result = run(&input);

        assert_eq!(result.details.filer_taxable_base, 1_870_000);
        assert_eq!(result.details.return_deduction, 650_000);
        assert_eq!(result.details.reduction, ReductionTier::None);
        assert_eq!(result.health_insurance.breakdown.medical, 211_603);
        assert_eq!(result.health_insurance.breakdown.support, 68_860);
        assert_eq!(result.health_insurance.breakdown.nursing, 60_632);
        assert_eq!(result.health_insurance.yearly, 341_095);
        assert_eq!(result.health_insurance.monthly, 28_424);

        // Pension 17,510 x 12, no over-65 levy
        assert_eq!(result.pension.yearly, 210_120);
        assert_eq!(result.long_term_care.yearly, 0);
        assert_eq!(result.current_total.yearly, 551_215);
        assert_eq!(result.current_total.monthly, 45_934);

        assert_eq!(result.alternative_plan.tier, PlanTier::Single);
        assert_eq!(result.comparison.difference_monthly, 45_934 - 38_500);
        assert_eq!(result.comparison.difference_yearly, 89_215);
        assert!(result.comparison.alternative_is_cheaper);
    }

    #[test]
    fn test_scenario_low_income_white_return() {
        // Income 800,000, age 30, white return: base 320,000; the reduction
        // test income 800,000 clears 430,000 and 725,000 but not 975,000,
        // landing in the 20%-reduction band
        let input = single_filer(800_000, 30, true, ReturnType::White);
        let result = run(&input);

        assert_eq!(result.details.filer_taxable_base, 320_000);
        assert_eq!(result.details.reduction, ReductionTier::Light);
        assert_eq!(result.health_insurance.breakdown.medical, 61_526);
        assert_eq!(result.health_insurance.breakdown.support, 20_368);
        // Age 30: no nursing component at all
        assert_eq!(result.health_insurance.breakdown.nursing, 0);
        assert_eq!(result.health_insurance.yearly, 81_894);
    }

    #[test]
    fn test_scenario_zero_income_spouse() {
        let mut input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        input.spouse = Some(PersonInput::new(PersonRole::Spouse, 42, 0));
        let result = run(&input);

        assert_eq!(result.details.member_count, 2);
        assert_eq!(result.details.care_eligible_count, 2);

        let spouse = &result.health_insurance.per_person[1];
        assert_eq!(spouse.role, PersonRole::Spouse);
        assert_eq!(spouse.taxable_base, 0);
        // No income share, but per-capita shares in every category
        assert_eq!(spouse.breakdown.medical, 49_100);
        assert_eq!(spouse.breakdown.support, 16_500);
        assert_eq!(spouse.breakdown.nursing, 16_500);
        assert!(spouse.breakdown.total > 0);

        // Family tier applies with a spouse
        assert_eq!(result.alternative_plan.tier, PlanTier::Family);
    }

    #[test]
    fn test_scenario_two_adult_children() {
        let mut input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        input.adult_children = vec![
            PersonInput::new(PersonRole::AdultChild, 25, 0),
            PersonInput::new(PersonRole::AdultChild, 22, 0),
        ];
        let result = run(&input);

        assert_eq!(result.details.member_count, 3);
        assert_eq!(result.health_insurance.yearly, 472_295);

        // Children carry per-capita shares only
        for child in &result.health_insurance.per_person[1..] {
            assert_eq!(child.role, PersonRole::AdultChild);
            assert_eq!(child.breakdown.medical, 49_100);
            assert_eq!(child.breakdown.support, 16_500);
            assert_eq!(child.breakdown.nursing, 0);
        }

        // All three members are pension payers (ages 40, 25, 22)
        assert_eq!(result.pension.payer_count, 3);
        assert_eq!(result.pension.yearly, 17_510 * 12 * 3);

        // Family tier from children alone, no spouse needed
        assert_eq!(result.alternative_plan.tier, PlanTier::Family);
    }

    #[test]
    fn test_scenario_dependent_savings_in_current_total() {
        let mut input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        input.model_dependents = true;
        input.dependents = vec![
            PersonInput::new(PersonRole::DependentParent, 80, 800_000), // skipped
            PersonInput::new(PersonRole::DependentParent, 70, 800_000),
        ];
        let result = run(&input);

        let savings = result.dependent_savings.as_ref().unwrap();
        assert_eq!(savings.per_dependent.len(), 1);
        assert_eq!(savings.per_dependent[0].age, 70);
        assert_eq!(savings.total_yearly, 185_694);

        // Savings fold into the current total when modeled
        assert_eq!(result.current_total.yearly, 551_215 + 185_694);
    }

    #[test]
    fn test_dependents_ignored_unless_modeled() {
        let mut input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        input.dependents = vec![PersonInput::new(PersonRole::DependentParent, 70, 800_000)];
        input.model_dependents = false;
        let result = run(&input);

        assert!(result.dependent_savings.is_none());
        assert_eq!(result.current_total.yearly, 551_215);
    }

    #[test]
    fn test_reconciliation_identity_over_compositions() {
        let compositions: Vec<HouseholdInput> = vec![
            single_filer(1_000_000, 35, false, ReturnType::White),
            {
                let mut h = single_filer(4_567_890, 52, true, ReturnType::Blue55);
                h.spouse = Some(PersonInput::new(PersonRole::Spouse, 48, 1_357_000));
                h.adult_children = vec![PersonInput::new(PersonRole::AdultChild, 24, 0)];
                h
            },
            {
                let mut h = single_filer(12_000_000, 66, true, ReturnType::Blue10);
                h.spouse = Some(PersonInput::new(PersonRole::Spouse, 67, 900_000));
                h
            },
        ];

        for input in &compositions {
            let result = run(input);
            let sum: i64 = result
                .health_insurance
                .per_person
                .iter()
                .map(|p| p.breakdown.total)
                .sum();
            assert_eq!(sum, result.health_insurance.breakdown.total);
        }
    }

    #[test]
    fn test_caps_hold_for_extreme_income() {
        let input = single_filer(500_000_000, 45, true, ReturnType::Blue65);
        let result = run(&input);
        let rates = RateTable::default();

        let b = result.health_insurance.breakdown;
        assert!(b.medical <= rates.medical.cap);
        assert!(b.support <= rates.support.cap);
        assert!(b.nursing <= rates.nursing.cap);
        assert!(b.total <= rates.aggregate_cap);

        // The single member carries the full capped breakdown, never a
        // reconciliation-distorted figure
        let primary = &result.health_insurance.per_person[0];
        assert_eq!(primary.breakdown, b);
    }

    #[test]
    fn test_per_person_non_negative_when_caps_bind() {
        // Every category cap binds at this income; per-person shares must
        // come out of the capped household amounts, so no member ever shows
        // a negative sub-premium
        let mut input = single_filer(500_000_000, 45, true, ReturnType::Blue65);
        input.spouse = Some(PersonInput::new(PersonRole::Spouse, 70, 0));
        input.adult_children = vec![PersonInput::new(PersonRole::AdultChild, 25, 0)];
        let result = run(&input);

        assert_eq!(result.health_insurance.yearly, 1_060_000);
        let sum: i64 = result
            .health_insurance
            .per_person
            .iter()
            .map(|p| p.breakdown.total)
            .sum();
        assert_eq!(sum, result.health_insurance.breakdown.total);
        for person in &result.health_insurance.per_person {
            assert!(person.breakdown.medical >= 0, "negative medical: {:?}", person);
            assert!(person.breakdown.support >= 0, "negative support: {:?}", person);
            assert!(person.breakdown.nursing >= 0, "negative nursing: {:?}", person);
            assert!(person.breakdown.total >= 0, "negative total: {:?}", person);
        }
    }

    #[test]
    fn test_idempotence() {
        let mut input = single_filer(3_456_789, 41, true, ReturnType::Blue55);
        input.spouse = Some(PersonInput::new(PersonRole::Spouse, 39, 1_111_111));
        input.model_dependents = true;
        input.dependents = vec![PersonInput::new(PersonRole::DependentOther, 33, 700_000)];

        let first = run(&input);
        let second = run(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_primary_income_refused() {
        let input = single_filer(0, 40, true, ReturnType::Blue65);
        let err = calculate(&input, &RateTable::default(), &CalcPolicy::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_rate_table_refused() {
        let input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        let mut rates = RateTable::default();
        rates.support.income_rate = -0.1;
        let err = calculate(&input, &rates, &CalcPolicy::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRateTable(_)));
    }

    #[test]
    fn test_reduction_basis_variants_differ() {
        // Low filer income with a well-paid spouse: the household basis sees
        // the combined figure and grants no reduction, the filer basis sees
        // 500,000 and lands in the 50% band
        let mut input = single_filer(500_000, 40, true, ReturnType::White);
        input.spouse = Some(PersonInput::new(PersonRole::Spouse, 40, 2_000_000));

        let rates = RateTable::default();
        let household_basis = calculate(&input, &rates, &CalcPolicy::default()).unwrap();
        let filer_policy = CalcPolicy {
            reduction_basis: ReductionBasis::FilerIncome,
            ..CalcPolicy::default()
        };
        let filer_basis = calculate(&input, &rates, &filer_policy).unwrap();

        assert_eq!(household_basis.details.reduction, ReductionTier::None);
        assert_eq!(filer_basis.details.reduction, ReductionTier::Half);
        assert!(filer_basis.health_insurance.yearly < household_basis.health_insurance.yearly);
    }

    #[test]
    fn test_equal_split_allocation_still_reconciles() {
        let mut input = single_filer(3_000_000, 40, true, ReturnType::Blue65);
        input.spouse = Some(PersonInput::new(PersonRole::Spouse, 42, 1_500_000));
        let policy = CalcPolicy {
            allocation: AllocationMethod::EqualSplit,
            ..CalcPolicy::default()
        };
        let result = calculate(&input, &RateTable::default(), &policy).unwrap();

        let sum: i64 = result
            .health_insurance
            .per_person
            .iter()
            .map(|p| p.breakdown.total)
            .sum();
        assert_eq!(sum, result.health_insurance.breakdown.total);
    }

    #[test]
    fn test_over_65_filer() {
        // Age 68: over-65 levy applies, pension does not, nursing component
        // absent without a 40-64 member
        let input = single_filer(2_000_000, 68, true, ReturnType::White);
        let result = run(&input);

        assert_eq!(result.pension.payer_count, 0);
        assert_eq!(result.long_term_care.yearly, 85_000);
        assert!(result.long_term_care.per_person[0].liable);
        assert_eq!(result.health_insurance.breakdown.nursing, 0);
    }
}
