//! PAYE income tax calculation.
//!
//! This module maps a monthly gross salary to pay-as-you-earn income tax
//! using a progressive bracket table.

use rust_decimal::Decimal;

use crate::config::TaxTable;
use crate::models::{MoneyAmount, non_negative};

/// Calculates PAYE for a monthly gross salary.
///
/// The bracket containing `gross` is the first one whose upper bound is at
/// or above it (the open top bracket catches everything else). Tax is that
/// bracket's base amount plus its marginal rate on the part of gross above
/// the previous bracket's upper bound. Negative gross is taxed as zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_paye;
/// use payroll_engine::config::DeductionSchedule;
/// use rust_decimal_macros::dec;
///
/// let table = DeductionSchedule::rwanda().tax;
///
/// assert_eq!(calculate_paye(dec!(60000), &table), dec!(0));
/// assert_eq!(calculate_paye(dec!(80000), &table), dec!(2000));
/// assert_eq!(calculate_paye(dec!(150000), &table), dec!(14000));
/// assert_eq!(calculate_paye(dec!(250000), &table), dec!(39000));
/// ```
pub fn calculate_paye(gross: MoneyAmount, table: &TaxTable) -> MoneyAmount {
    let gross = non_negative(gross);

    let mut lower_bound = Decimal::ZERO;
    for bracket in &table.brackets {
        match bracket.upper_bound {
            Some(upper) if gross > upper => lower_bound = upper,
            _ => return bracket.base_amount + bracket.marginal_rate * (gross - lower_bound),
        }
    }

    // Only reachable with a table whose last bracket is bounded, which
    // validation rejects; tax the excess at the last bracket's rate.
    table
        .brackets
        .last()
        .map(|bracket| bracket.base_amount + bracket.marginal_rate * (gross - lower_bound))
        .unwrap_or(Decimal::ZERO)
}
