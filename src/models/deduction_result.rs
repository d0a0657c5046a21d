//! The deduction breakdown produced for one gross salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{MoneyAmount, round_whole};

/// Every statutory deduction and derived pay figure for one gross salary.
///
/// Invariants (before rounding):
/// - `net_salary = gross_pay - (paye + rssb_employer + rssb_employee
///   + maternity_employer + maternity_employee)`
/// - `cbhi = cbhi_rate * net_salary`
/// - `take_home_2 = net_salary - cbhi`
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionResult;
/// use rust_decimal::Decimal;
///
/// let zero = DeductionResult::zero();
/// assert_eq!(zero.gross_pay, Decimal::ZERO);
/// assert_eq!(zero.take_home_2, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionResult {
    /// Pay-as-you-earn income tax.
    pub paye: MoneyAmount,
    /// RSSB pension contribution paid by the employer.
    pub rssb_employer: MoneyAmount,
    /// RSSB pension contribution paid by the employee.
    pub rssb_employee: MoneyAmount,
    /// Maternity leave contribution paid by the employer.
    pub maternity_employer: MoneyAmount,
    /// Maternity leave contribution paid by the employee.
    pub maternity_employee: MoneyAmount,
    /// Gross pay less PAYE and all four contributions.
    pub net_salary: MoneyAmount,
    /// Community-based health insurance levy on net salary.
    pub cbhi: MoneyAmount,
    /// Net salary less CBHI: what the employee actually receives.
    pub take_home_2: MoneyAmount,
    /// The gross salary these figures were computed from.
    pub gross_pay: MoneyAmount,
}

impl DeductionResult {
    /// A result with every field set to zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of PAYE and the four contributions (everything between gross and
    /// net salary).
    pub fn deductions_total(&self) -> MoneyAmount {
        self.paye
            + self.rssb_employer
            + self.rssb_employee
            + self.maternity_employer
            + self.maternity_employee
    }

    /// What the employer pays for this salary: gross plus the employer-side
    /// contributions.
    pub fn cost_to_company(&self) -> MoneyAmount {
        self.gross_pay + self.rssb_employer + self.maternity_employer
    }

    /// Returns a copy with every monetary field rounded to whole units.
    pub fn rounded(&self) -> Self {
        Self {
            paye: round_whole(self.paye),
            rssb_employer: round_whole(self.rssb_employer),
            rssb_employee: round_whole(self.rssb_employee),
            maternity_employer: round_whole(self.maternity_employer),
            maternity_employee: round_whole(self.maternity_employee),
            net_salary: round_whole(self.net_salary),
            cbhi: round_whole(self.cbhi),
            take_home_2: round_whole(self.take_home_2),
            gross_pay: round_whole(self.gross_pay),
        }
    }

    /// True when every field is zero.
    pub fn is_zero(&self) -> bool {
        [
            self.paye,
            self.rssb_employer,
            self.rssb_employee,
            self.maternity_employer,
            self.maternity_employee,
            self.net_salary,
            self.cbhi,
            self.take_home_2,
            self.gross_pay,
        ]
        .iter()
        .all(|amount| *amount == Decimal::ZERO)
    }
}
