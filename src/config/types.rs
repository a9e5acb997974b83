//! Configuration types for the Leave Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Employee, EmployeeId, Holiday, LeavePolicy};

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind, e.g. "127.0.0.1".
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl ServerSettings {
    /// Returns the `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Session resolution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Employee assumed when a request carries no identity header.
    pub default_employee_id: EmployeeId,
}

/// Clock settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClockSettings {
    /// Pins "today" to this date when set.
    #[serde(default)]
    pub fixed_date: Option<NaiveDate>,
}

/// Contents of settings.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Session settings.
    pub session: SessionSettings,
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockSettings,
}

/// Contents of employees.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Every employee.
    pub employees: Vec<Employee>,
}

/// Contents of leave_policies.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePoliciesConfig {
    /// Every leave policy.
    pub leave_policies: Vec<LeavePolicy>,
}

/// Contents of holidays.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Every holiday.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}
