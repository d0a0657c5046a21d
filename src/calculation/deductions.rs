//! Statutory deduction calculation.
//!
//! Given a gross salary, this module computes PAYE, RSSB pension and
//! maternity contributions, net salary, the CBHI levy and the resulting
//! take-home pay.

use crate::config::DeductionSchedule;
use crate::models::{DeductionResult, MoneyAmount, non_negative};

use super::paye::calculate_paye;

/// Computes every deduction for a gross salary.
///
/// - `paye` is charged only when `apply_tax` is set
/// - RSSB and maternity contributions are fractions of gross
/// - `net_salary` is gross less PAYE and all four contributions
/// - `cbhi` is a fraction of net salary, and `take_home_2` is what remains
///
/// Nothing is rounded here; the solver and callers decide when to round.
/// For a fixed `apply_tax` the take-home figure is strictly increasing in
/// gross under any validated schedule.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::DeductionSchedule;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_deductions(dec!(50000), true, &DeductionSchedule::rwanda());
///
/// assert_eq!(result.paye, dec!(0));
/// assert_eq!(result.rssb_employer, dec!(4000));
/// assert_eq!(result.net_salary, dec!(42550));
/// assert_eq!(result.cbhi, dec!(212.75));
/// assert_eq!(result.take_home_2, dec!(42337.25));
/// ```
pub fn calculate_deductions(
    gross: MoneyAmount,
    apply_tax: bool,
    schedule: &DeductionSchedule,
) -> DeductionResult {
    let gross = non_negative(gross);
    let rates = &schedule.contributions;

    let paye = if apply_tax {
        calculate_paye(gross, &schedule.tax)
    } else {
        MoneyAmount::ZERO
    };
    let rssb_employer = rates.rssb_employer * gross;
    let rssb_employee = rates.rssb_employee * gross;
    let maternity_employer = rates.maternity_employer * gross;
    let maternity_employee = rates.maternity_employee * gross;

    let net_salary =
        gross - (paye + rssb_employer + rssb_employee + maternity_employer + maternity_employee);
    let cbhi = rates.cbhi * net_salary;
    let take_home_2 = net_salary - cbhi;

    DeductionResult {
        paye,
        rssb_employer,
        rssb_employee,
        maternity_employer,
        maternity_employee,
        net_salary,
        cbhi,
        take_home_2,
        gross_pay: gross,
    }
}
