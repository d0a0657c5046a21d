//! Configuration loading and management for the payroll engine.
//!
//! This module loads the statutory deduction schedule (PAYE brackets,
//! RSSB, maternity and CBHI rates) and the payroll settings (employee
//! categories, solver limits) from YAML files. Built-in Rwandan defaults
//! are available through [`DeductionSchedule::rwanda`] and
//! [`PayrollSettings::default`].
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rwanda").unwrap();
//! println!("Loaded schedule: {}", config.schedule().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRates, DeductionSchedule, MAX_ITERATIONS_LIMIT, PayrollConfig, PayrollSettings,
    ScheduleMetadata, SolverSettings, TOTAL_CATEGORY, TaxBracket, TaxTable,
};
