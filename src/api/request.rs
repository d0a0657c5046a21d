//! Request types for the payroll engine API.
//!
//! The `/payroll/validate` endpoint accepts a
//! [`MonthlyPayroll`](crate::models::MonthlyPayroll) document as-is; only the
//! solver endpoint needs its own request shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SolverSettings;
use crate::models::MoneyAmount;

/// Request body for the `/gross-for-take-home` endpoint.
///
/// Amounts may be sent as JSON numbers or strings.
///
/// # Example
///
/// ```
/// use payroll_engine::api::GrossForTakeHomeRequest;
/// use rust_decimal_macros::dec;
///
/// let request: GrossForTakeHomeRequest =
///     serde_json::from_str(r#"{"take_home": "100000"}"#).unwrap();
/// assert_eq!(request.take_home, dec!(100000));
/// assert!(request.apply_tax);
/// assert_eq!(request.tolerance, dec!(1));
/// assert_eq!(request.max_iterations, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossForTakeHomeRequest {
    /// The take-home pay the employee should receive.
    pub take_home: MoneyAmount,
    /// Whether PAYE and statutory contributions apply.
    #[serde(default = "default_apply_tax")]
    pub apply_tax: bool,
    /// Bisection stops once take-home is within this distance of the target.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Maximum number of bisection steps.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_apply_tax() -> bool {
    true
}

fn default_tolerance() -> Decimal {
    SolverSettings::default().tolerance
}

fn default_max_iterations() -> u32 {
    SolverSettings::default().max_iterations
}

impl GrossForTakeHomeRequest {
    /// Applies this request's limits on top of the configured solver settings.
    pub fn solver_settings(&self, base: &SolverSettings) -> SolverSettings {
        base.with_limits(self.tolerance, self.max_iterations)
    }
}
