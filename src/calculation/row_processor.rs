//! Per-row payroll calculation.
//!
//! Each payroll row is priced by exactly one of three policies, checked in
//! order:
//!
//! 1. **No target**: no positive take-home entered, so everything is zero.
//! 2. **Tax-exempt**: tax does not apply, so gross, net and take-home all
//!    equal the target and no deductions are taken.
//! 3. **Solve**: the gross solver finds the gross that yields the target
//!    after all deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DeductionSchedule, SolverSettings};
use crate::models::{DeductionResult, PayrollRow};

use super::gross_solver::solve_for_take_home;

/// Which policy priced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Target take-home was missing, zero or negative.
    NoTarget,
    /// Tax does not apply; take-home passes straight through as gross.
    TaxExempt,
    /// Gross was solved from the target take-home.
    Solve,
}

impl RowPolicy {
    /// Selects the policy for a row without modifying it.
    pub fn select(row: &PayrollRow) -> Self {
        if row.target_take_home() <= Decimal::ZERO {
            RowPolicy::NoTarget
        } else if !row.applies_tax() {
            RowPolicy::TaxExempt
        } else {
            RowPolicy::Solve
        }
    }

    /// Stable identifier used in audit traces.
    pub fn rule_id(&self) -> &'static str {
        match self {
            RowPolicy::NoTarget => "row_no_target",
            RowPolicy::TaxExempt => "row_tax_exempt",
            RowPolicy::Solve => "row_solve",
        }
    }

    /// Human-readable rule name used in audit traces.
    pub fn rule_name(&self) -> &'static str {
        match self {
            RowPolicy::NoTarget => "No Take-Home Target",
            RowPolicy::TaxExempt => "Tax-Exempt Pass-Through",
            RowPolicy::Solve => "Gross-for-Take-Home Solve",
        }
    }
}

/// Populates a row's nine computed fields from its target take-home pay.
///
/// The row is overwritten in place; the returned [`RowPolicy`] says which
/// branch ran. In the solve branch tax always applies and the solver runs
/// with the given settings (normally a one-franc tolerance and 60
/// iterations).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{RowPolicy, process_row};
/// use payroll_engine::config::{DeductionSchedule, SolverSettings};
/// use payroll_engine::models::PayrollRow;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let mut row = PayrollRow::new("EMP-0001", "Support", dec!(80000), false);
/// let policy = process_row(&mut row, &DeductionSchedule::rwanda(), &SolverSettings::default());
///
/// assert_eq!(policy, RowPolicy::TaxExempt);
/// assert_eq!(row.computed.gross_pay, dec!(80000));
/// assert_eq!(row.computed.take_home_2, dec!(80000));
/// assert_eq!(row.computed.paye, Decimal::ZERO);
/// ```
pub fn process_row(
    row: &mut PayrollRow,
    schedule: &DeductionSchedule,
    settings: &SolverSettings,
) -> RowPolicy {
    let policy = RowPolicy::select(row);
    let target = row.target_take_home();

    row.computed = match policy {
        RowPolicy::NoTarget => DeductionResult::zero(),
        RowPolicy::TaxExempt => DeductionResult {
            gross_pay: target,
            net_salary: target,
            take_home_2: target,
            ..DeductionResult::zero()
        },
        RowPolicy::Solve => solve_for_take_home(target, true, schedule, settings),
    };

    debug!(
        employee = row.employee.as_deref().unwrap_or(""),
        policy = policy.rule_id(),
        target = %target,
        gross_pay = %row.computed.gross_pay,
        "Processed payroll row"
    );

    policy
}
