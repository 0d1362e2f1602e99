//! Run the comparison for a whole batch of household scenarios
//!
//! Reads scenario rows from a CSV, computes each household in parallel and
//! writes one summary row per scenario for downstream analysis.

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use kokuho_compare::rates::{find_region, load_rate_tables};
use kokuho_compare::{
    calculate, CalcPolicy, HouseholdInput, PersonInput, PersonRole, RateTable, ReturnType,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Batch premium comparison over scenario CSV")]
struct Args {
    /// Scenario CSV (Income,Age,FilesReturn,ReturnType,SpouseAge,SpouseIncome,AdultChildren)
    #[arg(long, default_value = "scenarios.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "batch_output.csv")]
    output: PathBuf,

    /// Regional rate table CSV; built-in rates otherwise
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Region to select from the rates CSV
    #[arg(long, default_value = "Tokyo Katsushika")]
    region: String,
}

/// One scenario row from the input CSV
#[derive(Debug, Deserialize)]
struct ScenarioRow {
    #[serde(rename = "Income")]
    income: i64,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "FilesReturn")]
    files_return: bool,
    #[serde(rename = "ReturnType")]
    return_type: String,
    #[serde(rename = "SpouseAge")]
    spouse_age: Option<u8>,
    #[serde(rename = "SpouseIncome")]
    spouse_income: Option<i64>,
    #[serde(rename = "AdultChildren")]
    adult_children: Option<usize>,
}

impl ScenarioRow {
    fn to_household(&self) -> Result<HouseholdInput> {
        let return_type: ReturnType = self
            .return_type
            .parse()
            .map_err(|e: String| anyhow!("row with income {}: {}", self.income, e))?;
        Ok(HouseholdInput {
            primary: PersonInput::new(PersonRole::Primary, self.age, self.income),
            spouse: self
                .spouse_age
                .map(|age| PersonInput::new(PersonRole::Spouse, age, self.spouse_income.unwrap_or(0))),
            adult_children: (0..self.adult_children.unwrap_or(0))
                .map(|_| PersonInput::new(PersonRole::AdultChild, 25, 0))
                .collect(),
            files_tax_return: self.files_return,
            return_type,
            dependents: vec![],
            model_dependents: false,
        })
    }
}

/// One output row per computed scenario
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "Income")]
    income: i64,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Members")]
    members: u32,
    #[serde(rename = "ReductionTier")]
    reduction_tier: String,
    #[serde(rename = "Medical")]
    medical: i64,
    #[serde(rename = "Support")]
    support: i64,
    #[serde(rename = "Nursing")]
    nursing: i64,
    #[serde(rename = "HealthYearly")]
    health_yearly: i64,
    #[serde(rename = "PensionYearly")]
    pension_yearly: i64,
    #[serde(rename = "CareYearly")]
    care_yearly: i64,
    #[serde(rename = "CurrentMonthly")]
    current_monthly: i64,
    #[serde(rename = "PlanMonthly")]
    plan_monthly: i64,
    #[serde(rename = "DiffMonthly")]
    diff_monthly: i64,
    #[serde(rename = "AlternativeCheaper")]
    alternative_cheaper: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Batch run started {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let rates = match &args.rates {
        Some(path) => {
            let tables = load_rate_tables(path)
                .map_err(|e| anyhow!("loading rate tables from {}: {}", path.display(), e))?;
            find_region(&tables, &args.region)
                .cloned()
                .ok_or_else(|| anyhow!("region '{}' not found", args.region))?
        }
        None => RateTable::default(),
    };
    println!("Rates: {} FY{}", rates.region, rates.fiscal_year);

    let start = Instant::now();
    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let scenarios: Vec<ScenarioRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("parsing scenario CSV")?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let households: Vec<HouseholdInput> = scenarios
        .iter()
        .map(|row| row.to_household())
        .collect::<Result<_>>()?;

    let policy = CalcPolicy::default();
    let calc_start = Instant::now();
    let summaries: Vec<SummaryRow> = households
        .par_iter()
        .map(|input| {
            let result = calculate(input, &rates, &policy)
                .map_err(|e| anyhow!("household with income {}: {}", input.primary.annual_income_yen, e))?;
            Ok(SummaryRow {
                income: input.primary.annual_income_yen,
                age: input.primary.age,
                members: result.details.member_count,
                reduction_tier: format!("{:?}", result.details.reduction),
                medical: result.health_insurance.breakdown.medical,
                support: result.health_insurance.breakdown.support,
                nursing: result.health_insurance.breakdown.nursing,
                health_yearly: result.health_insurance.yearly,
                pension_yearly: result.pension.yearly,
                care_yearly: result.long_term_care.yearly,
                current_monthly: result.current_total.monthly,
                plan_monthly: result.alternative_plan.monthly,
                diff_monthly: result.comparison.difference_monthly,
                alternative_cheaper: result.comparison.alternative_is_cheaper,
            })
        })
        .collect::<Result<_>>()?;
    println!("Computed {} households in {:?}", summaries.len(), calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &summaries {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let cheaper = summaries.iter().filter(|s| s.alternative_cheaper).count();
    println!("\nSummary:");
    println!("  Scenarios:            {}", summaries.len());
    println!("  Alternative cheaper:  {}", cheaper);
    println!("  Results written to:   {}", args.output.display());

    Ok(())
}
