//! Error types for the payroll engine.
//!
//! The calculation core itself never fails: missing numbers coerce to zero.
//! Errors only arise at the edges, when configuration is loaded or when a
//! payroll document is rejected before any row is calculated.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The deduction schedule is structurally unusable (gaps in the bracket
    /// table, rates outside `[0, 1)`, or deductions that would stop take-home
    /// pay from growing with gross).
    #[error("Invalid deduction schedule: {message}")]
    InvalidSchedule {
        /// A description of the problem.
        message: String,
    },

    /// Payroll or solver settings are out of range.
    #[error("Invalid payroll settings: {message}")]
    InvalidSettings {
        /// A description of the problem.
        message: String,
    },

    /// A take-home target is above the configured maximum.
    #[error("Take-home {take_home} exceeds the maximum of {limit}")]
    TakeHomeOutOfRange {
        /// The requested take-home pay.
        take_home: Decimal,
        /// The configured maximum.
        limit: Decimal,
    },

    /// The same employee appears on more than one row of a payroll document.
    #[error("Employee '{employee}' is added more than once in this Monthly Payroll")]
    DuplicateEmployee {
        /// The repeated employee identifier.
        employee: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
