//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod deduction_result;
mod money;
mod payroll_result;
mod payroll_row;
mod summary;

pub use deduction_result::DeductionResult;
pub use money::{MoneyAmount, non_negative, or_zero, round_whole};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, PayrollSheetResult};
pub use payroll_row::{MonthlyPayroll, PayrollRow};
pub use summary::{CategorySummary, PeriodTotals};
