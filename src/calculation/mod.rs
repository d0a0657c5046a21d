//! Calculation logic for the payroll engine.
//!
//! This module contains PAYE calculation, the statutory deduction breakdown
//! for a gross salary, the gross-for-take-home solver that inverts it, the
//! per-row pricing policies, aggregation into summaries and totals, and the
//! full validation pass over a monthly payroll document.

mod aggregation;
mod deductions;
mod gross_solver;
mod paye;
mod payroll_sheet;
mod row_processor;

pub use aggregation::{calculate_period_totals, sum_summaries, summarize, summarize_by_category};
pub use deductions::calculate_deductions;
pub use gross_solver::{
    GrossSolution, compute_gross_for_take_home, solve_for_take_home, solve_with_stats,
};
pub use paye::calculate_paye;
pub use payroll_sheet::{check_duplicate_employees, process_payroll};
pub use row_processor::{RowPolicy, process_row};
