//! Personal deduction calculator
//!
//! Converts a person's gross annual income into the post-deduction taxable
//! base premiums are computed against. The primary filer gets the filing
//! deduction for their return type; everyone else gets the graduated
//! employment-style deduction schedule. Bases are floored at zero and never
//! negative.

use crate::engine::floor_yen;
use crate::household::ReturnType;

/// Filer income after the filing deduction, before the basic deduction.
///
/// This is also the filer's contribution to the reduction-tier test income.
pub fn filer_income_after_return(
    income_yen: i64,
    files_tax_return: bool,
    return_type: ReturnType,
) -> i64 {
    let deduction = if files_tax_return {
        return_type.deduction()
    } else {
        0
    };
    (income_yen - deduction).max(0)
}

/// Primary filer's taxable base: filing deduction, then basic deduction
pub fn filer_taxable_base(
    income_yen: i64,
    files_tax_return: bool,
    return_type: ReturnType,
    basic_deduction: i64,
) -> i64 {
    (filer_income_after_return(income_yen, files_tax_return, return_type) - basic_deduction).max(0)
}

/// Graduated employment-style deduction: gross income to adjusted income.
///
/// Breakpoints at 550,000 / 1,619,000 / 1,800,000 / 3,600,000 / 6,600,000 /
/// 8,500,000 yen, each bracket a distinct linear formula; above the top
/// bracket a flat 1,950,000 is subtracted.
pub fn adjusted_income(income_yen: i64) -> i64 {
    if income_yen <= 550_000 {
        0
    } else if income_yen <= 1_619_000 {
        income_yen - 550_000
    } else if income_yen <= 1_800_000 {
        floor_yen(income_yen as f64 * 0.6 + 100_000.0)
    } else if income_yen <= 3_600_000 {
        floor_yen(income_yen as f64 * 0.7 - 80_000.0)
    } else if income_yen <= 6_600_000 {
        floor_yen(income_yen as f64 * 0.8 - 440_000.0)
    } else if income_yen <= 8_500_000 {
        floor_yen(income_yen as f64 * 0.9 - 1_100_000.0)
    } else {
        income_yen - 1_950_000
    }
}

/// Non-primary member's taxable base: graduated schedule, then basic deduction.
///
/// Zero income yields a zero base directly.
pub fn person_taxable_base(income_yen: i64, basic_deduction: i64) -> i64 {
    if income_yen <= 0 {
        return 0;
    }
    (adjusted_income(income_yen) - basic_deduction).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filer_base_blue_return() {
        // 3,000,000 - 650,000 - 480,000 = 1,870,000
        let base = filer_taxable_base(3_000_000, true, ReturnType::Blue65, 480_000);
        assert_eq!(base, 1_870_000);
    }

    #[test]
    fn test_filer_base_white_return() {
        // White return carries no filing deduction
        assert_eq!(
            filer_taxable_base(800_000, true, ReturnType::White, 480_000),
            320_000
        );
        // Not filing at all is equivalent
        assert_eq!(
            filer_taxable_base(800_000, false, ReturnType::Blue65, 480_000),
            320_000
        );
    }

    #[test]
    fn test_filer_base_floors_at_zero() {
        assert_eq!(
            filer_taxable_base(500_000, true, ReturnType::Blue65, 480_000),
            0
        );
        assert_eq!(filer_taxable_base(0, true, ReturnType::Blue65, 480_000), 0);
    }

    #[test]
    fn test_adjusted_income_brackets() {
        assert_eq!(adjusted_income(400_000), 0);
        assert_eq!(adjusted_income(550_000), 0);
        assert_eq!(adjusted_income(1_000_000), 450_000);
        assert_eq!(adjusted_income(1_619_000), 1_069_000);
        // 1,700,000 * 0.6 + 100,000 = 1,120,000
        assert_eq!(adjusted_income(1_700_000), 1_120_000);
        // 3,000,000 * 0.7 - 80,000 = 2,020,000
        assert_eq!(adjusted_income(3_000_000), 2_020_000);
        // 5,000,000 * 0.8 - 440,000 = 3,560,000
        assert_eq!(adjusted_income(5_000_000), 3_560_000);
        // 8,000,000 * 0.9 - 1,100,000 = 6,100,000
        assert_eq!(adjusted_income(8_000_000), 6_100_000);
        // Above 8.5M a flat 1,950,000 comes off
        assert_eq!(adjusted_income(10_000_000), 8_050_000);
    }

    #[test]
    fn test_person_base() {
        assert_eq!(person_taxable_base(0, 480_000), 0);
        // 1,000,000 -> 450,000 adjusted, under the basic deduction
        assert_eq!(person_taxable_base(1_000_000, 480_000), 0);
        // 2,000,000 -> floor(0.7 * 2,000,000 - 80,000) = 1,320,000 - 480,000
        assert_eq!(person_taxable_base(2_000_000, 480_000), 840_000);
    }

    #[test]
    fn test_base_never_negative() {
        for income in [0, 1, 549_999, 550_001, 1_030_000, 8_500_001] {
            assert!(person_taxable_base(income, 480_000) >= 0);
            assert!(filer_taxable_base(income, true, ReturnType::Blue65, 480_000) >= 0);
        }
    }
}
