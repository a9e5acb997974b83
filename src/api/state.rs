//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::EmployeeId;
use crate::service::LeaveService;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// leave service and the employee assumed when a request carries no
/// identity.
#[derive(Clone)]
pub struct AppState {
    service: Arc<LeaveService>,
    default_employee_id: EmployeeId,
}

impl AppState {
    /// Creates a new application state around a leave service.
    pub fn new(service: LeaveService, default_employee_id: EmployeeId) -> Self {
        Self {
            service: Arc::new(service),
            default_employee_id,
        }
    }

    /// Builds the state from a loaded configuration: an in-memory store
    /// seeded with its records and the clock its settings select.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let service = LeaveService::new(Arc::new(config.in_memory_store()), config.clock());
        Self::new(service, config.settings().session.default_employee_id)
    }

    /// Returns the leave service.
    pub fn service(&self) -> &LeaveService {
        &self.service
    }

    /// Returns the employee used when no identity is supplied.
    pub fn default_employee_id(&self) -> EmployeeId {
        self.default_employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_config_uses_session_default() {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        let state = AppState::from_config(&config);
        assert_eq!(
            state.default_employee_id(),
            config.settings().session.default_employee_id
        );
    }
}
