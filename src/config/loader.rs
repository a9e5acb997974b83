//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine's
//! settings and seed data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::error::{LeaveError, LeaveResult};
use crate::models::{Employee, Holiday, LeavePolicy};
use crate::store::InMemoryStore;

use super::types::{EmployeesConfig, HolidaysConfig, LeavePoliciesConfig, Settings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── settings.yaml        # Server, session and clock settings
/// ├── employees.yaml       # Employees
/// ├── leave_policies.yaml  # Leave policies and their yearly allowance
/// └── holidays.yaml        # Holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.settings().server.bind_address());
/// for policy in loader.leave_policies() {
///     println!("{}: {:?}", policy.title, policy.yearly_cap());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    employees: Vec<Employee>,
    leave_policies: Vec<LeavePolicy>,
    holidays: Vec<Holiday>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    /// - Two employees, leave policies or holidays share an identifier
    pub fn load<P: AsRef<Path>>(path: P) -> LeaveResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;

        let employees_path = path.join("employees.yaml");
        let employees = Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees;
        Self::ensure_unique(&employees_path, employees.iter().map(|e| e.id))?;

        let policies_path = path.join("leave_policies.yaml");
        let leave_policies = Self::load_yaml::<LeavePoliciesConfig>(&policies_path)?.leave_policies;
        Self::ensure_unique(&policies_path, leave_policies.iter().map(|p| p.id))?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidaysConfig>(&holidays_path)?.holidays;
        Self::ensure_unique(&holidays_path, holidays.iter().map(|h| h.id))?;

        Ok(Self {
            settings,
            employees,
            leave_policies,
            holidays,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LeaveResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LeaveError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LeaveError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Fails if any identifier occurs twice.
    fn ensure_unique(path: &Path, ids: impl Iterator<Item = u64>) -> LeaveResult<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(LeaveError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate id {}", id),
                });
            }
        }
        Ok(())
    }

    /// Returns the server, session and clock settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the configured employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the configured leave policies.
    pub fn leave_policies(&self) -> &[LeavePolicy] {
        &self.leave_policies
    }

    /// Returns the configured holidays.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Builds the clock selected by the settings: a [`FixedClock`] when
    /// `clock.fixed_date` is set, the [`SystemClock`] otherwise.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.settings.clock.fixed_date {
            Some(date) => Arc::new(FixedClock(date)),
            None => Arc::new(SystemClock),
        }
    }

    /// Builds an in-memory store seeded with the configured records.
    pub fn in_memory_store(&self) -> InMemoryStore {
        InMemoryStore::new(
            self.employees.clone(),
            self.leave_policies.clone(),
            self.holidays.clone(),
        )
    }
}
