//! Configuration loading and management for the Leave Engine.
//!
//! This module provides functionality to load the engine configuration from
//! YAML files: server, session and clock settings, plus the employees, leave
//! policies and holidays the in-memory store is seeded with.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} leave policies", config.leave_policies().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClockSettings, EmployeesConfig, HolidaysConfig, LeavePoliciesConfig, ServerSettings,
    SessionSettings, Settings,
};
