//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the deduction
//! schedule and payroll settings from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionSchedule, PayrollConfig, PayrollSettings, SolverSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/rwanda/
/// ├── schedule.yaml   # Metadata, PAYE brackets, contribution and levy rates
/// └── payroll.yaml    # Employee categories and solver settings
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/rwanda").unwrap();
/// println!("Loaded schedule: {}", loader.schedule().metadata.name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The schedule or settings fail validation (`InvalidSchedule`, `InvalidSettings`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<DeductionSchedule>(&path.join("schedule.yaml"))?;
        let settings = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;

        let loader = Self::from_parts(schedule, settings)?;
        debug!(
            path = %path.display(),
            schedule = %loader.schedule().metadata.code,
            brackets = loader.schedule().tax.brackets.len(),
            categories = loader.categories().len(),
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from already-constructed parts, validating both.
    pub fn from_parts(
        schedule: DeductionSchedule,
        settings: PayrollSettings,
    ) -> EngineResult<Self> {
        schedule.validate()?;
        settings.validate()?;
        Ok(Self {
            config: PayrollConfig::new(schedule, settings),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the deduction schedule.
    pub fn schedule(&self) -> &DeductionSchedule {
        self.config.schedule()
    }

    /// Returns the configured employee categories.
    pub fn categories(&self) -> &[String] {
        self.config.categories()
    }

    /// Returns the solver settings.
    pub fn solver(&self) -> &SolverSettings {
        self.config.solver()
    }
}
