//! Summary records derived from a processed payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::MoneyAmount;

/// Per-category totals for one payroll sheet.
///
/// The summary table holds one of these per configured category followed
/// by a synthetic "Total" record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category label, or "Total" for the grand-total record.
    pub employee_type: String,
    /// Number of rows in the category.
    pub employee_count: u32,
    /// Sum of target take-home pay.
    pub advance_pay: MoneyAmount,
    /// Sum of computed net salary.
    pub net_salary: MoneyAmount,
    /// `net_salary - advance_pay`.
    pub net_minus_advance: MoneyAmount,
    /// Sum of gross pay plus employer-side contributions.
    pub cost_to_company: MoneyAmount,
}

impl CategorySummary {
    /// An empty summary for the given category.
    pub fn empty(employee_type: impl Into<String>) -> Self {
        Self {
            employee_type: employee_type.into(),
            employee_count: 0,
            advance_pay: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            net_minus_advance: Decimal::ZERO,
            cost_to_company: Decimal::ZERO,
        }
    }
}

/// Totals over every row of a payroll sheet, regardless of category.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PeriodTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PeriodTotals::default();
/// assert_eq!(totals.total_taxes, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of gross pay.
    pub total_cost: MoneyAmount,
    /// Sum of target take-home pay.
    pub advance_pay: MoneyAmount,
    /// Sum of net salary.
    pub net_salary: MoneyAmount,
    /// `net_salary - advance_pay`.
    pub net_minus_advance: MoneyAmount,
    /// Sum of PAYE.
    pub total_paye: MoneyAmount,
    /// Sum of employer and employee RSSB contributions.
    pub total_rssb: MoneyAmount,
    /// Sum of employer and employee maternity contributions.
    pub total_maternity: MoneyAmount,
    /// Sum of CBHI levies.
    pub total_cbhi: MoneyAmount,
    /// PAYE + RSSB + maternity + CBHI.
    pub total_taxes: MoneyAmount,
}
