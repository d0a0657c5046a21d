//! Monthly payroll document validation.
//!
//! Runs one full validation pass over a [`MonthlyPayroll`]: rejects repeated
//! employees, prices every row, and rebuilds the summary table and period
//! totals from the priced rows.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, MonthlyPayroll, PayrollRow, PayrollSheetResult,
};

use super::aggregation::summarize;
use super::row_processor::{RowPolicy, process_row};

/// Rejects a document that lists the same employee on more than one row.
///
/// Rows without an employee identifier are not checked.
pub fn check_duplicate_employees(rows: &[PayrollRow]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for employee in rows.iter().filter_map(PayrollRow::employee_id) {
        if !seen.insert(employee) {
            return Err(EngineError::DuplicateEmployee {
                employee: employee.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a monthly payroll and returns the priced rows with their
/// summary and totals.
///
/// The input document is left untouched; the result carries new copies of
/// the rows with their computed fields filled in.
///
/// # Errors
///
/// Returns [`EngineError::DuplicateEmployee`] if an employee appears on more
/// than one row, or [`EngineError::TakeHomeOutOfRange`] if a row's target is
/// above the configured maximum. No row is priced in either case.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::process_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{MonthlyPayroll, PayrollRow};
/// use rust_decimal_macros::dec;
///
/// let payroll = MonthlyPayroll {
///     company: Some("Green Hills Academy".to_string()),
///     month: Some("March".to_string()),
///     year: Some(2025),
///     rows: vec![PayrollRow::new("EMP-0001", "Academic", dec!(100000), true)],
/// };
///
/// let result = process_payroll(&payroll, &ConfigLoader::default()).unwrap();
/// assert_eq!(result.rows[0].computed.gross_pay, dec!(129805));
/// assert_eq!(result.totals.total_cost, dec!(129805));
/// ```
pub fn process_payroll(
    payroll: &MonthlyPayroll,
    config: &ConfigLoader,
) -> EngineResult<PayrollSheetResult> {
    let start_time = Instant::now();

    check_duplicate_employees(&payroll.rows)?;

    let schedule = config.schedule();
    let solver = config.solver();
    let categories = config.categories();

    for row in &payroll.rows {
        solver.check_take_home(row.target_take_home())?;
    }

    let mut rows = payroll.rows.clone();
    let mut steps = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for (index, row) in rows.iter_mut().enumerate() {
        let step_number = index as u32 + 1;
        let policy = process_row(row, schedule, solver);
        steps.push(audit_step(step_number, row, policy));

        match row.employee_type.as_deref() {
            Some(category) if categories.iter().any(|c| c == category) => {}
            other => {
                warn!(
                    row = step_number,
                    employee_type = other.unwrap_or(""),
                    "Row category is not summarised"
                );
                warnings.push(AuditWarning {
                    code: "UNKNOWN_CATEGORY".to_string(),
                    message: format!(
                        "Row {} has employee type '{}', which is not one of {}; it counts toward period totals only",
                        step_number,
                        other.unwrap_or(""),
                        categories.join(", ")
                    ),
                    severity: "low".to_string(),
                });
            }
        }
    }

    let (summary_by_type, totals) = summarize(&rows, categories);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        company = payroll.company.as_deref().unwrap_or(""),
        month = payroll.month.as_deref().unwrap_or(""),
        year = payroll.year.unwrap_or_default(),
        rows = rows.len(),
        total_cost = %totals.total_cost,
        total_taxes = %totals.total_taxes,
        duration_us,
        "Processed monthly payroll"
    );

    Ok(PayrollSheetResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        company: payroll.company.clone(),
        month: payroll.month.clone(),
        year: payroll.year,
        rows,
        summary_by_type,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

fn audit_step(step_number: u32, row: &PayrollRow, policy: RowPolicy) -> AuditStep {
    let computed = &row.computed;
    let target = row.target_take_home();

    let reasoning = match policy {
        RowPolicy::NoTarget => {
            "No positive take-home entered; all amounts set to zero".to_string()
        }
        RowPolicy::TaxExempt => format!(
            "Tax does not apply; gross, net and take-home all equal the target {}",
            target
        ),
        RowPolicy::Solve => format!(
            "Smallest whole gross reaching take-home {} is {} (PAYE {}, take-home {})",
            target, computed.gross_pay, computed.paye, computed.take_home_2
        ),
    };

    AuditStep {
        step_number,
        rule_id: policy.rule_id().to_string(),
        rule_name: policy.rule_name().to_string(),
        input: serde_json::json!({
            "employee": row.employee,
            "employee_type": row.employee_type,
            "take_home": target.to_string(),
            "apply_tax": row.applies_tax()
        }),
        output: serde_json::json!({
            "gross_pay": computed.gross_pay.to_string(),
            "net_salary": computed.net_salary.to_string(),
            "take_home_2": computed.take_home_2.to_string(),
            "deductions": computed.deductions_total().to_string()
        }),
        reasoning,
    }
}
