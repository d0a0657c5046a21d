//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! built-in Rwandan defaults used when no configuration directory is given.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The label of the synthetic grand-total summary row.
pub const TOTAL_CATEGORY: &str = "Total";

/// Metadata about the deduction schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short identifier of the schedule (e.g., "RW-PAYE-MONTHLY").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// URL to the official documentation of the rates.
    pub source_url: String,
}

/// One band of the progressive income-tax table.
///
/// The lower bound of a bracket is the previous bracket's `upper_bound`
/// (zero for the first one). Tax inside the bracket is
/// `base_amount + marginal_rate * (gross - lower_bound)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket; `None` for the open top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Tax due at the bracket's lower bound.
    pub base_amount: Decimal,
    /// Rate applied to the part of gross above the lower bound.
    pub marginal_rate: Decimal,
}

/// The PAYE bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    /// Brackets ordered by increasing upper bound, last one unbounded.
    pub brackets: Vec<TaxBracket>,
}

/// Contribution and levy rates, all expressed as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// RSSB pension, employer share (of gross).
    pub rssb_employer: Decimal,
    /// RSSB pension, employee share (of gross).
    pub rssb_employee: Decimal,
    /// Maternity leave contribution, employer share (of gross).
    pub maternity_employer: Decimal,
    /// Maternity leave contribution, employee share (of gross).
    pub maternity_employee: Decimal,
    /// Community-based health insurance levy (of net salary).
    pub cbhi: Decimal,
}

impl ContributionRates {
    /// Sum of the four gross-based contribution rates.
    pub fn gross_based_total(&self) -> Decimal {
        self.rssb_employer + self.rssb_employee + self.maternity_employer + self.maternity_employee
    }
}

/// The complete statutory deduction schedule: PAYE brackets plus
/// contribution rates.
///
/// # Example
///
/// ```
/// use payroll_engine::config::DeductionSchedule;
///
/// let schedule = DeductionSchedule::rwanda();
/// assert_eq!(schedule.tax.brackets.len(), 4);
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSchedule {
    /// Schedule metadata.
    pub metadata: ScheduleMetadata,
    /// PAYE bracket table.
    pub tax: TaxTable,
    /// Contribution and levy rates.
    pub contributions: ContributionRates,
}

impl DeductionSchedule {
    /// The built-in Rwandan monthly schedule.
    pub fn rwanda() -> Self {
        Self {
            metadata: ScheduleMetadata {
                code: "RW-PAYE-MONTHLY".to_string(),
                name: "Rwanda PAYE and social security (monthly)".to_string(),
                version: "2025-01-01".to_string(),
                source_url: "https://www.rra.gov.rw/en/domestic-tax-services/paye".to_string(),
            },
            tax: TaxTable {
                brackets: vec![
                    TaxBracket {
                        upper_bound: Some(dec!(60000)),
                        base_amount: Decimal::ZERO,
                        marginal_rate: Decimal::ZERO,
                    },
                    TaxBracket {
                        upper_bound: Some(dec!(100000)),
                        base_amount: Decimal::ZERO,
                        marginal_rate: dec!(0.10),
                    },
                    TaxBracket {
                        upper_bound: Some(dec!(200000)),
                        base_amount: dec!(4000),
                        marginal_rate: dec!(0.20),
                    },
                    TaxBracket {
                        upper_bound: None,
                        base_amount: dec!(24000),
                        marginal_rate: dec!(0.30),
                    },
                ],
            },
            contributions: ContributionRates {
                rssb_employer: dec!(0.08),
                rssb_employee: dec!(0.06),
                maternity_employer: dec!(0.006),
                maternity_employee: dec!(0.003),
                cbhi: dec!(0.005),
            },
        }
    }

    /// Checks that the schedule keeps take-home pay strictly increasing in
    /// gross, which the gross solver relies on for a minimal answer.
    ///
    /// Tax must be continuous: each bracket's `base_amount` equals the tax
    /// due at the previous bracket's upper bound. Every marginal rate plus
    /// the gross-based contribution rates must stay below 100%.
    pub fn validate(&self) -> EngineResult<()> {
        let brackets = &self.tax.brackets;
        if brackets.is_empty() {
            return Err(invalid_schedule("tax table has no brackets"));
        }

        let rates = &self.contributions;
        for (name, rate) in [
            ("rssb_employer", rates.rssb_employer),
            ("rssb_employee", rates.rssb_employee),
            ("maternity_employer", rates.maternity_employer),
            ("maternity_employee", rates.maternity_employee),
            ("cbhi", rates.cbhi),
        ] {
            check_fraction(name, rate)?;
        }

        let mut lower_bound = Decimal::ZERO;
        let mut tax_at_lower = None;
        let last = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            check_fraction(&format!("brackets[{}].marginal_rate", index), bracket.marginal_rate)?;
            if bracket.base_amount < Decimal::ZERO {
                return Err(invalid_schedule(format!(
                    "brackets[{}].base_amount must not be negative",
                    index
                )));
            }
            if let Some(expected) = tax_at_lower {
                if bracket.base_amount != expected {
                    return Err(invalid_schedule(format!(
                        "brackets[{}].base_amount {} must equal the tax due at its lower bound, {}",
                        index, bracket.base_amount, expected
                    )));
                }
            }
            if bracket.marginal_rate + rates.gross_based_total() >= Decimal::ONE {
                return Err(invalid_schedule(format!(
                    "brackets[{}]: marginal rate plus contributions must stay below 100%",
                    index
                )));
            }

            match bracket.upper_bound {
                Some(upper) if index == last => {
                    return Err(invalid_schedule(format!(
                        "last bracket must be unbounded, found upper bound {}",
                        upper
                    )));
                }
                Some(upper) => {
                    if upper <= lower_bound {
                        return Err(invalid_schedule(format!(
                            "brackets[{}].upper_bound {} must exceed {}",
                            index, upper, lower_bound
                        )));
                    }
                    tax_at_lower =
                        Some(bracket.base_amount + bracket.marginal_rate * (upper - lower_bound));
                    lower_bound = upper;
                }
                None if index != last => {
                    return Err(invalid_schedule(format!(
                        "only the last bracket may be unbounded (brackets[{}])",
                        index
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

impl Default for DeductionSchedule {
    fn default() -> Self {
        Self::rwanda()
    }
}

fn check_fraction(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(invalid_schedule(format!(
            "{} must be in [0, 1), found {}",
            name, rate
        )));
    }
    Ok(())
}

fn invalid_schedule(message: impl Into<String>) -> EngineError {
    EngineError::InvalidSchedule {
        message: message.into(),
    }
}

/// Largest accepted `max_iterations`. Bisection on a whole-franc interval
/// runs out of representable midpoints well before this.
pub const MAX_ITERATIONS_LIMIT: u32 = 200;

/// Tuning knobs for the gross-for-take-home search.
///
/// Apart from `max_take_home`, none of these affect correctness: the final whole-unit adjustment always
/// lands on the minimal gross. They only bound how much work the bracketing
/// and bisection phases do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Bisection stops early once take-home is within this distance of the target.
    pub tolerance: Decimal,
    /// Maximum number of bisection steps.
    pub max_iterations: u32,
    /// Assumed lower bound on take-home as a fraction of gross, used to seed
    /// the upper end of the search interval.
    pub take_home_floor_ratio: Decimal,
    /// Smallest upper end of the initial search interval.
    pub initial_upper_bound: Decimal,
    /// Maximum number of times the upper end is doubled.
    pub max_doublings: u32,
    /// Largest take-home target accepted from payroll rows and requests.
    pub max_take_home: Decimal,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: Decimal::ONE,
            max_iterations: 60,
            take_home_floor_ratio: dec!(0.55),
            initial_upper_bound: dec!(200000),
            max_doublings: 30,
            max_take_home: dec!(1000000000000),
        }
    }
}

impl SolverSettings {
    /// Returns a copy with a different tolerance and iteration cap.
    pub fn with_limits(self, tolerance: Decimal, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..self
        }
    }

    /// Checks that the settings describe a usable search.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tolerance < Decimal::ZERO {
            return Err(invalid_settings(format!(
                "tolerance must not be negative, found {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid_settings("max_iterations must be at least 1"));
        }
        if self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(invalid_settings(format!(
                "max_iterations must not exceed {}, found {}",
                MAX_ITERATIONS_LIMIT, self.max_iterations
            )));
        }
        if self.take_home_floor_ratio <= Decimal::ZERO || self.take_home_floor_ratio > Decimal::ONE
        {
            return Err(invalid_settings(format!(
                "take_home_floor_ratio must be in (0, 1], found {}",
                self.take_home_floor_ratio
            )));
        }
        if self.initial_upper_bound <= Decimal::ZERO {
            return Err(invalid_settings("initial_upper_bound must be positive"));
        }
        if self.max_take_home <= Decimal::ZERO {
            return Err(invalid_settings("max_take_home must be positive"));
        }
        Ok(())
    }

    /// Rejects a take-home target above `max_take_home`.
    pub fn check_take_home(&self, take_home: Decimal) -> EngineResult<()> {
        if take_home > self.max_take_home {
            return Err(EngineError::TakeHomeOutOfRange {
                take_home,
                limit: self.max_take_home,
            });
        }
        Ok(())
    }
}

/// Payroll-document settings from `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Employee categories summarised on every payroll sheet, in display order.
    pub categories: Vec<String>,
    /// Settings for the gross solver.
    pub solver: SolverSettings,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            categories: vec![
                "Academic".to_string(),
                "Administrative".to_string(),
                "Support".to_string(),
            ],
            solver: SolverSettings::default(),
        }
    }
}

impl PayrollSettings {
    /// Checks category names and solver settings.
    pub fn validate(&self) -> EngineResult<()> {
        if self.categories.is_empty() {
            return Err(invalid_settings("at least one employee category is required"));
        }
        for (index, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(invalid_settings(format!("categories[{}] is empty", index)));
            }
            if category == TOTAL_CATEGORY {
                return Err(invalid_settings(format!(
                    "'{}' is reserved for the grand total row",
                    TOTAL_CATEGORY
                )));
            }
            if self.categories[..index].contains(category) {
                return Err(invalid_settings(format!(
                    "category '{}' is listed more than once",
                    category
                )));
            }
        }
        self.solver.validate()
    }
}

fn invalid_settings(message: impl Into<String>) -> EngineError {
    EngineError::InvalidSettings {
        message: message.into(),
    }
}

/// The complete payroll configuration: deduction schedule plus payroll
/// settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollConfig {
    schedule: DeductionSchedule,
    settings: PayrollSettings,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(schedule: DeductionSchedule, settings: PayrollSettings) -> Self {
        Self { schedule, settings }
    }

    /// Returns the deduction schedule.
    pub fn schedule(&self) -> &DeductionSchedule {
        &self.schedule
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the configured employee categories.
    pub fn categories(&self) -> &[String] {
        &self.settings.categories
    }

    /// Returns the solver settings.
    pub fn solver(&self) -> &SolverSettings {
        &self.settings.solver
    }
}
