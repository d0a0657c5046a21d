//! Payroll sheet aggregation.
//!
//! Folds processed rows into the per-category summary table and the period
//! totals. Both are rebuilt from the rows on every call.

use crate::config::TOTAL_CATEGORY;
use crate::models::{CategorySummary, PayrollRow, PeriodTotals, or_zero};

/// Builds the summary table: one record per category in `categories`, in
/// that order, followed by a "Total" record.
///
/// Rows whose `employee_type` is missing or not one of `categories` do not
/// contribute to any category (nor, therefore, to "Total").
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::summarize_by_category;
/// use payroll_engine::models::PayrollRow;
/// use rust_decimal_macros::dec;
///
/// let mut row = PayrollRow::new("EMP-0001", "Support", dec!(80000), false);
/// row.computed.gross_pay = dec!(80000);
/// row.computed.net_salary = dec!(80000);
///
/// let categories = vec!["Academic".to_string(), "Support".to_string()];
/// let summary = summarize_by_category(&[row], &categories);
///
/// assert_eq!(summary.len(), 3);
/// assert_eq!(summary[1].employee_count, 1);
/// assert_eq!(summary[2].employee_type, "Total");
/// assert_eq!(summary[2].cost_to_company, dec!(80000));
/// ```
pub fn summarize_by_category(rows: &[PayrollRow], categories: &[String]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> =
        categories.iter().map(CategorySummary::empty).collect();

    for row in rows {
        let Some(employee_type) = row.employee_type.as_deref() else {
            continue;
        };
        let Some(summary) = summaries
            .iter_mut()
            .find(|summary| summary.employee_type == employee_type)
        else {
            continue;
        };

        summary.employee_count += 1;
        summary.advance_pay += or_zero(row.take_home);
        summary.net_salary += row.computed.net_salary;
        summary.cost_to_company += row.computed.cost_to_company();
    }

    let mut total = CategorySummary::empty(TOTAL_CATEGORY);
    for summary in &mut summaries {
        summary.net_minus_advance = summary.net_salary - summary.advance_pay;

        total.employee_count += summary.employee_count;
        total.advance_pay += summary.advance_pay;
        total.net_salary += summary.net_salary;
        total.cost_to_company += summary.cost_to_company;
    }
    total.net_minus_advance = total.net_salary - total.advance_pay;

    summaries.push(total);
    summaries
}

/// Folds every row, whatever its category, into the period totals.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_period_totals;
/// use payroll_engine::models::PayrollRow;
/// use rust_decimal_macros::dec;
///
/// let mut row = PayrollRow::new("EMP-0001", "Unlisted", dec!(80000), false);
/// row.computed.gross_pay = dec!(80000);
/// row.computed.net_salary = dec!(80000);
///
/// let totals = calculate_period_totals(&[row]);
/// assert_eq!(totals.total_cost, dec!(80000));
/// assert_eq!(totals.net_minus_advance, dec!(0));
/// ```
pub fn calculate_period_totals(rows: &[PayrollRow]) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for row in rows {
        let computed = &row.computed;
        totals.total_cost += computed.gross_pay;
        totals.advance_pay += or_zero(row.take_home);
        totals.net_salary += computed.net_salary;
        totals.total_paye += computed.paye;
        totals.total_rssb += computed.rssb_employee + computed.rssb_employer;
        totals.total_maternity += computed.maternity_employee + computed.maternity_employer;
        totals.total_cbhi += computed.cbhi;
    }

    totals.net_minus_advance = totals.net_salary - totals.advance_pay;
    totals.total_taxes =
        totals.total_paye + totals.total_rssb + totals.total_maternity + totals.total_cbhi;
    totals
}

/// Builds both the summary table and the period totals.
pub fn summarize(rows: &[PayrollRow], categories: &[String]) -> (Vec<CategorySummary>, PeriodTotals) {
    (
        summarize_by_category(rows, categories),
        calculate_period_totals(rows),
    )
}

/// Field-wise sum of category summaries, before `net_minus_advance` is
/// recomputed. Used to check the "Total" record.
pub fn sum_summaries<'a>(summaries: impl IntoIterator<Item = &'a CategorySummary>) -> CategorySummary {
    summaries
        .into_iter()
        .fold(CategorySummary::empty(TOTAL_CATEGORY), |mut acc, summary| {
            acc.employee_count += summary.employee_count;
            acc.advance_pay += summary.advance_pay;
            acc.net_salary += summary.net_salary;
            acc.net_minus_advance += summary.net_minus_advance;
            acc.cost_to_company += summary.cost_to_company;
            acc
        })
}
