//! Household input data structures

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Position of a person within the household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonRole {
    /// The self-employed primary filer
    Primary,
    Spouse,
    /// Child aged 20 or over, covered as a household member with no income
    AdultChild,
    /// Hypothetical dependent: a parent considered for flat-plan coverage
    DependentParent,
    /// Hypothetical dependent: any other cohabiting relative
    DependentOther,
}

/// Tax return filing category for the primary filer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnType {
    /// Blue return, double-entry books filed electronically (650,000 yen)
    Blue65,
    /// Blue return, double-entry books filed on paper (550,000 yen)
    Blue55,
    /// Blue return, simplified books (100,000 yen)
    Blue10,
    /// White return (no special deduction)
    White,
}

impl ReturnType {
    /// Filing deduction in yen
    pub fn deduction(&self) -> i64 {
        match self {
            ReturnType::Blue65 => 650_000,
            ReturnType::Blue55 => 550_000,
            ReturnType::Blue10 => 100_000,
            ReturnType::White => 0,
        }
    }
}

impl FromStr for ReturnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue-65" => Ok(ReturnType::Blue65),
            "blue-55" => Ok(ReturnType::Blue55),
            "blue-10" => Ok(ReturnType::Blue10),
            "white" => Ok(ReturnType::White),
            other => Err(format!("Unknown return type: {}", other)),
        }
    }
}

/// One covered person, constructed fresh per calculation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    pub age: u8,
    pub annual_income_yen: i64,
    pub role: PersonRole,
}

impl PersonInput {
    pub fn new(role: PersonRole, age: u8, annual_income_yen: i64) -> Self {
        Self {
            age,
            annual_income_yen,
            role,
        }
    }

    /// Liable for the income-linked nursing-care component (ages 40-64)
    pub fn care_eligible(&self) -> bool {
        (40..65).contains(&self.age)
    }
}

/// Full household snapshot consumed by one engine invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdInput {
    /// The self-employed primary filer (required)
    pub primary: PersonInput,

    #[serde(default)]
    pub spouse: Option<PersonInput>,

    /// Adult children covered as members; assumed income-free
    #[serde(default)]
    pub adult_children: Vec<PersonInput>,

    /// Whether the primary filer files a tax return
    #[serde(default)]
    pub files_tax_return: bool,

    /// Filing category; only meaningful when `files_tax_return` is set
    #[serde(default = "default_return_type")]
    pub return_type: ReturnType,

    /// Hypothetical dependents (parents / other relatives) whose stand-alone
    /// premiums are estimated for the savings comparison
    #[serde(default)]
    pub dependents: Vec<PersonInput>,

    /// Whether dependent savings fold into the current-regime total
    #[serde(default)]
    pub model_dependents: bool,
}

fn default_return_type() -> ReturnType {
    ReturnType::Blue65
}

impl HouseholdInput {
    /// Covered member count: primary + spouse + adult children.
    /// Hypothetical dependents are not household members.
    pub fn member_count(&self) -> u32 {
        1 + self.spouse.is_some() as u32 + self.adult_children.len() as u32
    }

    /// Members aged 40-64, liable for the nursing-care component
    pub fn care_eligible_count(&self) -> u32 {
        self.members().filter(|p| p.care_eligible()).count() as u32
    }

    /// Iterate covered members in allocation order (primary first)
    pub fn members(&self) -> impl Iterator<Item = &PersonInput> {
        std::iter::once(&self.primary)
            .chain(self.spouse.iter())
            .chain(self.adult_children.iter())
    }

    /// Social-insurance dependent-range advisory for the spouse.
    ///
    /// Limit is 1,800,000 yen at age 60+ and 1,300,000 yen below.
    pub fn spouse_range_check(&self) -> Option<SpouseRangeCheck> {
        let spouse = self.spouse.as_ref()?;
        if spouse.annual_income_yen <= 0 {
            return None;
        }
        let limit_yen = if spouse.age >= 60 {
            1_800_000
        } else {
            1_300_000
        };
        Some(SpouseRangeCheck {
            limit_yen,
            within_range: spouse.annual_income_yen < limit_yen,
        })
    }
}

/// Whether the spouse's income fits the social-insurance dependent range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseRangeCheck {
    pub limit_yen: i64,
    pub within_range: bool,
}
