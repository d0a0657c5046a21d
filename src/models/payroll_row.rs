//! Payroll row and monthly payroll document models.
//!
//! A [`MonthlyPayroll`] is the document the surrounding payroll system hands
//! over: one row per employee for a company and month. Rows arrive with the
//! target take-home pay filled in and leave with their deduction fields
//! computed.

use serde::{Deserialize, Serialize};

use super::deduction_result::DeductionResult;
use super::money::{MoneyAmount, or_zero};

/// One line of a monthly payroll: an employee, their target take-home pay,
/// and the figures computed from it.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollRow;
/// use rust_decimal::Decimal;
///
/// let row = PayrollRow::new("EMP-0001", "Academic", Decimal::from(80000), true);
/// assert_eq!(row.target_take_home(), Decimal::from(80000));
/// assert!(row.applies_tax());
/// assert!(row.computed.is_zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// Identifier of the employee this row pays.
    #[serde(default)]
    pub employee: Option<String>,
    /// Employee category used for the summary table (e.g., "Academic").
    #[serde(default)]
    pub employee_type: Option<String>,
    /// Target take-home pay (the "advance" agreed with the employee).
    #[serde(default)]
    pub take_home: Option<MoneyAmount>,
    /// Whether PAYE and statutory contributions apply to this employee.
    #[serde(default)]
    pub apply_tax: Option<bool>,
    /// Fields filled in by the row processor.
    #[serde(flatten)]
    pub computed: DeductionResult,
}

impl PayrollRow {
    /// Creates a row with no computed fields yet.
    pub fn new(
        employee: impl Into<String>,
        employee_type: impl Into<String>,
        take_home: MoneyAmount,
        apply_tax: bool,
    ) -> Self {
        Self {
            employee: Some(employee.into()),
            employee_type: Some(employee_type.into()),
            take_home: Some(take_home),
            apply_tax: Some(apply_tax),
            computed: DeductionResult::zero(),
        }
    }

    /// The target take-home pay, zero when missing.
    pub fn target_take_home(&self) -> MoneyAmount {
        or_zero(self.take_home)
    }

    /// Whether tax applies; a missing flag means it does not.
    pub fn applies_tax(&self) -> bool {
        self.apply_tax.unwrap_or(false)
    }

    /// The employee identifier, if one is set and non-empty. Identifiers are
    /// returned verbatim, so ids differing only in whitespace are distinct.
    pub fn employee_id(&self) -> Option<&str> {
        self.employee.as_deref().filter(|id| !id.is_empty())
    }
}

/// A company's payroll document for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayroll {
    /// The paying company.
    #[serde(default)]
    pub company: Option<String>,
    /// Payroll month (e.g., "January").
    #[serde(default)]
    pub month: Option<String>,
    /// Payroll year.
    #[serde(default)]
    pub year: Option<i32>,
    /// One row per employee.
    #[serde(default)]
    pub rows: Vec<PayrollRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_input_row_without_computed_fields() {
        let json = r#"{
            "employee": "EMP-0001",
            "employee_type": "Academic",
            "take_home": 80000,
            "apply_tax": true
        }"#;

        let row: PayrollRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.employee.as_deref(), Some("EMP-0001"));
        assert_eq!(row.target_take_home(), dec!(80000));
        assert!(row.applies_tax());
        assert!(row.computed.is_zero());
    }

    #[test]
    fn test_missing_fields_coerce_to_defaults() {
        let row: PayrollRow = serde_json::from_str(r#"{"take_home": null}"#).unwrap();

        assert_eq!(row.target_take_home(), Decimal::ZERO);
        assert!(!row.applies_tax());
        assert_eq!(row.employee_id(), None);
    }

    #[test]
    fn test_empty_employee_is_treated_as_missing() {
        let mut row = PayrollRow::new("", "Support", dec!(1000), false);
        assert_eq!(row.employee_id(), None);

        row.employee = Some(" EMP-0002 ".to_string());
        assert_eq!(row.employee_id(), Some(" EMP-0002 "));
    }

    #[test]
    fn test_serialized_row_exposes_computed_fields_flat() {
        let mut row = PayrollRow::new("EMP-0001", "Support", dec!(80000), false);
        row.computed.gross_pay = dec!(80000);

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["gross_pay"], "80000");
        assert_eq!(value["employee_type"], "Support");
        assert!(value.get("computed").is_none());
    }

    #[test]
    fn test_deserialize_monthly_payroll() {
        let json = r#"{
            "company": "Green Hills Academy",
            "month": "March",
            "year": 2025,
            "rows": [
                {"employee": "EMP-0001", "employee_type": "Academic", "take_home": "250000", "apply_tax": true},
                {"employee": "EMP-0002", "employee_type": "Support", "take_home": 45000}
            ]
        }"#;

        let payroll: MonthlyPayroll = serde_json::from_str(json).unwrap();
        assert_eq!(payroll.company.as_deref(), Some("Green Hills Academy"));
        assert_eq!(payroll.year, Some(2025));
        assert_eq!(payroll.rows.len(), 2);
        assert!(!payroll.rows[1].applies_tax());
    }
}
