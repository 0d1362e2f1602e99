//! Form-value sanitization
//!
//! The calculator form delivers every field as free text. This module is the
//! single place where loose values are coerced to clean numbers, with one
//! documented fallback per field, so the engine itself only ever sees typed
//! input. Incomes arrive in man-yen (units of 10,000 yen) as typed into the
//! form and are converted to yen here.

use super::{HouseholdInput, PersonInput, PersonRole, ReturnType};
use serde::Deserialize;

/// Fallback age for the primary filer when the field is blank or non-numeric
pub const DEFAULT_PRIMARY_AGE: u8 = 40;
/// Fallback age for the spouse
pub const DEFAULT_SPOUSE_AGE: u8 = 40;
/// Assumed age for adult children (only the count is collected)
pub const DEFAULT_ADULT_CHILD_AGE: u8 = 25;
/// Fallback age for a dependent parent
pub const DEFAULT_PARENT_AGE: u8 = 70;
/// Fallback age for another cohabiting dependent
pub const DEFAULT_OTHER_AGE: u8 = 30;
/// Fallback income for a hypothetical dependent, in man-yen (800,000 yen)
pub const DEFAULT_DEPENDENT_INCOME_MAN: f64 = 80.0;

/// One dependent row as typed into the form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDependent {
    pub age: String,
    pub income_man_yen: String,
}

/// The full form state, all numeric fields still raw strings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHouseholdForm {
    /// Annual business income in man-yen
    pub income_man_yen: String,
    pub age: String,
    pub files_tax_return: bool,
    /// Filing category key, e.g. "blue-65"
    pub return_type: String,
    pub spouse: bool,
    pub spouse_age: String,
    pub spouse_income_man_yen: String,
    /// Count of adult children (20+) covered as members
    pub adult_children: String,
    pub model_dependents: bool,
    pub dependent_parents: Vec<RawDependent>,
    pub dependent_others: Vec<RawDependent>,
}

/// Parse an age field, falling back to `default` on blank or non-numeric text
fn parse_age(raw: &str, default: u8) -> u8 {
    raw.trim().parse::<u8>().unwrap_or(default)
}

/// Parse a man-yen income field into yen.
///
/// Non-numeric or negative text coerces to `default_man` man-yen; fractional
/// man-yen amounts are floored to whole yen.
fn parse_income_man(raw: &str, default_man: f64) -> i64 {
    let man = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0);
    (man.unwrap_or(default_man) * 10_000.0).floor() as i64
}

/// Parse a non-negative count field, falling back to 0
fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

impl RawHouseholdForm {
    /// Coerce the raw form into a typed household snapshot.
    ///
    /// Never fails: every field has a deterministic fallback. Validation of
    /// the primary income (must be positive) is the engine's responsibility.
    pub fn sanitize(&self) -> HouseholdInput {
        let primary = PersonInput::new(
            PersonRole::Primary,
            parse_age(&self.age, DEFAULT_PRIMARY_AGE),
            parse_income_man(&self.income_man_yen, 0.0),
        );

        let spouse = self.spouse.then(|| {
            PersonInput::new(
                PersonRole::Spouse,
                parse_age(&self.spouse_age, DEFAULT_SPOUSE_AGE),
                parse_income_man(&self.spouse_income_man_yen, 0.0),
            )
        });

        let adult_children = (0..parse_count(&self.adult_children))
            .map(|_| PersonInput::new(PersonRole::AdultChild, DEFAULT_ADULT_CHILD_AGE, 0))
            .collect();

        let mut dependents = Vec::new();
        for parent in &self.dependent_parents {
            dependents.push(PersonInput::new(
                PersonRole::DependentParent,
                parse_age(&parent.age, DEFAULT_PARENT_AGE),
                parse_income_man(&parent.income_man_yen, DEFAULT_DEPENDENT_INCOME_MAN),
            ));
        }
        for other in &self.dependent_others {
            dependents.push(PersonInput::new(
                PersonRole::DependentOther,
                parse_age(&other.age, DEFAULT_OTHER_AGE),
                parse_income_man(&other.income_man_yen, DEFAULT_DEPENDENT_INCOME_MAN),
            ));
        }

        HouseholdInput {
            primary,
            spouse,
            adult_children,
            files_tax_return: self.files_tax_return,
            return_type: self
                .return_type
                .parse::<ReturnType>()
                .unwrap_or(ReturnType::Blue65),
            dependents,
            model_dependents: self.model_dependents,
        }
    }
}
