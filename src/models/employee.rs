//! Employee model.
//!
//! Employees are reference data for the engine: leave requests point at them
//! and entitlements are computed for them, but nothing here mutates them.

use serde::{Deserialize, Serialize};

/// Identifier of an [`Employee`].
pub type EmployeeId = u64;

/// Represents a person who can request leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Whether the employee may approve or reject leave requests.
    #[serde(default)]
    pub is_admin: bool,
}
