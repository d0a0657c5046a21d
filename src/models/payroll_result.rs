//! Payroll sheet result models.
//!
//! This module contains the [`PayrollSheetResult`] type and its audit
//! structures, capturing everything produced by one validation pass over a
//! [`MonthlyPayroll`](super::MonthlyPayroll): the processed rows, the summary
//! table, the period totals and a trace of which policy priced each row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payroll_row::PayrollRow;
use super::summary::{CategorySummary, PeriodTotals};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag rows that were priced but may need attention, such as a
/// row whose category is missing from the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// One step per row, in row order.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The result of validating a monthly payroll document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSheetResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The paying company, copied from the document.
    pub company: Option<String>,
    /// The payroll month, copied from the document.
    pub month: Option<String>,
    /// The payroll year, copied from the document.
    pub year: Option<i32>,
    /// The rows with their deduction fields populated.
    pub rows: Vec<PayrollRow>,
    /// One summary per category, followed by the "Total" summary.
    pub summary_by_type: Vec<CategorySummary>,
    /// Totals over all rows.
    pub totals: PeriodTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
