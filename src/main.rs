//! Kokuho Compare CLI
//!
//! Computes one household's current social-insurance cost and compares it
//! against the flat-rate alternative plan.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use kokuho_compare::rates::{find_region, load_rate_tables};
use kokuho_compare::{
    calculate, AllocationMethod, CalcPolicy, HouseholdInput, PersonInput, PersonRole, RateTable,
    ReductionBasis, ReturnType,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kokuho_compare", version, about = "Social-insurance premium comparison for self-employed households")]
struct Args {
    /// Primary filer's annual business income in yen
    #[arg(long, default_value_t = 3_000_000)]
    income: i64,

    /// Primary filer's age
    #[arg(long, default_value_t = 40)]
    age: u8,

    /// Skip the tax-return filing deduction
    #[arg(long)]
    no_return: bool,

    /// Filing category: blue-65, blue-55, blue-10 or white
    #[arg(long, default_value = "blue-65")]
    return_type: ReturnType,

    /// Cover a spouse of this age
    #[arg(long)]
    spouse_age: Option<u8>,

    /// Spouse's annual income in yen
    #[arg(long, default_value_t = 0)]
    spouse_income: i64,

    /// Number of covered adult children (assumed income-free)
    #[arg(long, default_value_t = 0)]
    adult_children: usize,

    /// Age used for every covered adult child
    #[arg(long, default_value_t = 25)]
    adult_child_age: u8,

    /// Read the full household snapshot from a JSON file instead of flags
    #[arg(long)]
    json_input: Option<PathBuf>,

    /// Regional rate table CSV; built-in Tokyo Katsushika 2025 rates otherwise
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Region to select from the rates CSV
    #[arg(long, default_value = "Tokyo Katsushika")]
    region: String,

    /// Test the reduction tiers against the filer's income alone
    #[arg(long)]
    filer_basis: bool,

    /// Split every premium category evenly across members
    #[arg(long)]
    equal_split: bool,

    /// Emit the full result as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn household_from_args(args: &Args) -> Result<HouseholdInput> {
    if let Some(path) = &args.json_input {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading household JSON from {}", path.display()))?;
        let input: HouseholdInput = serde_json::from_str(&raw).context("parsing household JSON")?;
        return Ok(input);
    }

    Ok(HouseholdInput {
        primary: PersonInput::new(PersonRole::Primary, args.age, args.income),
        spouse: args
            .spouse_age
            .map(|age| PersonInput::new(PersonRole::Spouse, age, args.spouse_income)),
        adult_children: (0..args.adult_children)
            .map(|_| PersonInput::new(PersonRole::AdultChild, args.adult_child_age, 0))
            .collect(),
        files_tax_return: !args.no_return,
        return_type: args.return_type,
        dependents: vec![],
        model_dependents: false,
    })
}

fn rates_from_args(args: &Args) -> Result<RateTable> {
    match &args.rates {
        Some(path) => {
            let tables = load_rate_tables(path)
                .map_err(|e| anyhow!("loading rate tables from {}: {}", path.display(), e))?;
            find_region(&tables, &args.region)
                .cloned()
                .ok_or_else(|| anyhow!("region '{}' not found in {}", args.region, path.display()))
        }
        None => Ok(RateTable::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = household_from_args(&args)?;
    let rates = rates_from_args(&args)?;
    let policy = CalcPolicy {
        reduction_basis: if args.filer_basis {
            ReductionBasis::FilerIncome
        } else {
            ReductionBasis::HouseholdIncome
        },
        allocation: if args.equal_split {
            AllocationMethod::EqualSplit
        } else {
            AllocationMethod::IncomeShare
        },
    };

    let result = calculate(&input, &rates, &policy)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Kokuho Compare ({} FY{})", rates.region, rates.fiscal_year);
    println!("==============================\n");

    println!("Household: {} member(s), reduction tier {:?}",
        result.details.member_count, result.details.reduction);
    println!("  Filer taxable base:     {:>12} yen", result.details.filer_taxable_base);
    println!("  Household taxable base: {:>12} yen", result.details.household_taxable_base);
    if let Some(range) = &result.details.spouse_range {
        println!(
            "  Spouse income {} the {} yen dependent range",
            if range.within_range { "within" } else { "exceeds" },
            range.limit_yen
        );
    }
    println!();

    println!("Health insurance (yearly):");
    println!("  Medical: {:>10}  Support: {:>10}  Nursing: {:>10}",
        result.health_insurance.breakdown.medical,
        result.health_insurance.breakdown.support,
        result.health_insurance.breakdown.nursing);
    println!("  Total:   {:>10} yen ({} yen/month)",
        result.health_insurance.yearly, result.health_insurance.monthly);
    for person in &result.health_insurance.per_person {
        println!("    {:<16} age {:>3}  {:>10} yen",
            format!("{:?}", person.role), person.age, person.breakdown.total);
    }
    println!();

    println!("National pension:  {:>10} yen/year ({} payer(s))",
        result.pension.yearly, result.pension.payer_count);
    println!("Over-65 care levy: {:>10} yen/year", result.long_term_care.yearly);
    if let Some(savings) = &result.dependent_savings {
        println!("Dependent savings: {:>10} yen/year across {} relative(s)",
            savings.total_yearly, savings.per_dependent.len());
    }
    println!();

    println!("Current total:     {:>10} yen/year ({} yen/month)",
        result.current_total.yearly, result.current_total.monthly);
    println!("Alternative plan:  {:>10} yen/year ({} yen/month, {:?} tier)",
        result.alternative_plan.yearly, result.alternative_plan.monthly,
        result.alternative_plan.tier);
    println!();

    if result.comparison.alternative_is_cheaper {
        println!("Alternative plan saves {} yen/month ({} yen/year)",
            result.comparison.difference_monthly, result.comparison.difference_yearly);
    } else {
        println!("Current coverage is cheaper by {} yen/month",
            -result.comparison.difference_monthly);
    }

    Ok(())
}
