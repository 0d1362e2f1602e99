//! Load regional rate tables from CSV
//!
//! Premium rates vary by municipality; one CSV row carries the full rate set
//! for one region and fiscal year. The statutory basic deductions are
//! national figures and are not part of the regional file.

use super::{CategoryRates, DependentEstimateRates, FlatPlanPrices, RateTable};
use csv::Reader;
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the regional rates file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "FiscalYear")]
    fiscal_year: u16,
    #[serde(rename = "PensionMonthly")]
    pension_monthly: i64,
    #[serde(rename = "CareOver65Yearly")]
    care_over65_yearly: i64,
    #[serde(rename = "MedicalIncomeRate")]
    medical_income_rate: f64,
    #[serde(rename = "MedicalPerCapita")]
    medical_per_capita: i64,
    #[serde(rename = "MedicalCap")]
    medical_cap: i64,
    #[serde(rename = "SupportIncomeRate")]
    support_income_rate: f64,
    #[serde(rename = "SupportPerCapita")]
    support_per_capita: i64,
    #[serde(rename = "SupportCap")]
    support_cap: i64,
    #[serde(rename = "NursingIncomeRate")]
    nursing_income_rate: f64,
    #[serde(rename = "NursingPerCapita")]
    nursing_per_capita: i64,
    #[serde(rename = "NursingCap")]
    nursing_cap: i64,
    #[serde(rename = "AggregateCap")]
    aggregate_cap: i64,
    #[serde(rename = "DependentIncomeRate")]
    dependent_income_rate: f64,
    #[serde(rename = "DependentPerCapita")]
    dependent_per_capita: i64,
    #[serde(rename = "FlatSingleMonthly")]
    flat_single_monthly: i64,
    #[serde(rename = "FlatFamilyMonthly")]
    flat_family_monthly: i64,
}

impl CsvRow {
    fn to_table(self) -> Result<RateTable, Box<dyn Error>> {
        let national = RateTable::default();
        let table = RateTable {
            fiscal_year: self.fiscal_year,
            region: self.region,
            pension_monthly: self.pension_monthly,
            care_over65_yearly: self.care_over65_yearly,
            basic_deduction_income_tax: national.basic_deduction_income_tax,
            basic_deduction_resident: national.basic_deduction_resident,
            medical: CategoryRates {
                income_rate: self.medical_income_rate,
                per_capita: self.medical_per_capita,
                cap: self.medical_cap,
            },
            support: CategoryRates {
                income_rate: self.support_income_rate,
                per_capita: self.support_per_capita,
                cap: self.support_cap,
            },
            nursing: CategoryRates {
                income_rate: self.nursing_income_rate,
                per_capita: self.nursing_per_capita,
                cap: self.nursing_cap,
            },
            aggregate_cap: self.aggregate_cap,
            dependent_estimate: DependentEstimateRates {
                income_rate: self.dependent_income_rate,
                per_capita: self.dependent_per_capita,
            },
            flat_plan: FlatPlanPrices {
                single_monthly: self.flat_single_monthly,
                family_monthly: self.flat_family_monthly,
            },
        };
        table.validate()?;
        Ok(table)
    }
}

/// Load all rate tables from a CSV file
pub fn load_rate_tables<P: AsRef<Path>>(path: P) -> Result<Vec<RateTable>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    read_tables(&mut reader)
}

/// Load rate tables from any reader (used by tests and embedded data)
pub fn load_rate_tables_from_reader<R: Read>(reader: R) -> Result<Vec<RateTable>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(reader);
    read_tables(&mut reader)
}

fn read_tables<R: Read>(reader: &mut Reader<R>) -> Result<Vec<RateTable>, Box<dyn Error>> {
    let mut tables = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        tables.push(row.to_table()?);
    }
    Ok(tables)
}

/// Find a region's table, matching the region name case-insensitively
pub fn find_region<'a>(tables: &'a [RateTable], region: &str) -> Option<&'a RateTable> {
    tables
        .iter()
        .find(|t| t.region.eq_ignore_ascii_case(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Region,FiscalYear,PensionMonthly,CareOver65Yearly,MedicalIncomeRate,MedicalPerCapita,MedicalCap,SupportIncomeRate,SupportPerCapita,SupportCap,NursingIncomeRate,NursingPerCapita,NursingCap,AggregateCap,DependentIncomeRate,DependentPerCapita,FlatSingleMonthly,FlatFamilyMonthly
Tokyo Katsushika,2025,17510,85000,0.0869,49100,650000,0.0280,16500,240000,0.0236,16500,170000,1060000,0.1074,91500,38500,40000
Osaka City,2025,17510,90000,0.0924,47000,650000,0.0312,15000,240000,0.0285,17000,170000,1060000,0.1150,90000,38500,40000
";

    #[test]
    fn test_load_from_reader() {
        let tables = load_rate_tables_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0], RateTable::default());
        assert_eq!(tables[1].region, "Osaka City");
        assert_eq!(tables[1].care_over65_yearly, 90_000);
    }

    #[test]
    fn test_find_region() {
        let tables = load_rate_tables_from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(find_region(&tables, "osaka city").is_some());
        assert!(find_region(&tables, "Nagoya").is_none());
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let bad = SAMPLE.replace("0.0869", "1.9");
        assert!(load_rate_tables_from_reader(bad.as_bytes()).is_err());
    }
}
