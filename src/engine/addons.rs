//! Pension and over-65 long-term-care add-ons
//!
//! Flat, age-gated yearly amounts charged per person on top of the household
//! health-insurance premium. The two gates are independent: pension for ages
//! 20-59, long-term-care levy for ages 65 and over.

use crate::engine::result::{LongTermCare65, LtcFlag, Pension};
use crate::household::PersonInput;
use crate::rates::RateTable;

/// National pension liability: ages 20-59 inclusive
pub fn pension_liable(age: u8) -> bool {
    (20..60).contains(&age)
}

/// Over-65 long-term-care liability
pub fn care_over65_liable(age: u8) -> bool {
    age >= 65
}

/// Sum pension across all liable members
pub fn pension_summary<'a>(
    members: impl Iterator<Item = &'a PersonInput>,
    rates: &RateTable,
) -> Pension {
    let payer_count = members.filter(|p| pension_liable(p.age)).count() as u32;
    let monthly = rates.pension_monthly * payer_count as i64;
    Pension {
        yearly: monthly * 12,
        monthly,
        payer_count,
    }
}

/// Sum the over-65 levy across members, keeping a per-person flag
pub fn long_term_care_summary<'a>(
    members: impl Iterator<Item = &'a PersonInput>,
    rates: &RateTable,
) -> LongTermCare65 {
    let per_person: Vec<LtcFlag> = members
        .map(|p| LtcFlag {
            role: p.role,
            age: p.age,
            liable: care_over65_liable(p.age),
        })
        .collect();
    let liable_count = per_person.iter().filter(|f| f.liable).count() as i64;
    LongTermCare65 {
        yearly: rates.care_over65_yearly * liable_count,
        per_person,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::PersonRole;

    #[test]
    fn test_pension_age_gates() {
        assert!(!pension_liable(19));
        assert!(pension_liable(20));
        assert!(pension_liable(59));
        assert!(!pension_liable(60));
    }

    #[test]
    fn test_care_age_gate() {
        assert!(!care_over65_liable(64));
        assert!(care_over65_liable(65));
    }

    #[test]
    fn test_pension_summary() {
        let rates = RateTable::default();
        let members = vec![
            PersonInput::new(PersonRole::Primary, 40, 3_000_000),
            PersonInput::new(PersonRole::Spouse, 62, 0),
            PersonInput::new(PersonRole::AdultChild, 25, 0),
        ];

        let pension = pension_summary(members.iter(), &rates);
        // Spouse at 62 is past the pension window
        assert_eq!(pension.payer_count, 2);
        assert_eq!(pension.monthly, 17_510 * 2);
        assert_eq!(pension.yearly, 17_510 * 24);
    }

    #[test]
    fn test_long_term_care_summary() {
        let rates = RateTable::default();
        let members = vec![
            PersonInput::new(PersonRole::Primary, 68, 2_000_000),
            PersonInput::new(PersonRole::Spouse, 63, 0),
        ];

        let ltc = long_term_care_summary(members.iter(), &rates);
        assert_eq!(ltc.yearly, 85_000);
        assert_eq!(ltc.per_person.len(), 2);
        assert!(ltc.per_person[0].liable);
        assert!(!ltc.per_person[1].liable);
    }
}
