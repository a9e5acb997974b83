//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying days,
//! aggregating entitlements and handling leave requests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeId, LeavePolicyId, LeaveRequestId, LeaveStatus};

/// The main error type for the Leave Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::LeaveError;
///
/// let error = LeaveError::EmployeeNotFound { id: 7 };
/// assert_eq!(error.to_string(), "Employee not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum LeaveError {
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

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: EmployeeId,
    },

    /// No leave policy exists with the given identifier.
    #[error("Leave policy not found: {id}")]
    LeavePolicyNotFound {
        /// The identifier that was looked up.
        id: LeavePolicyId,
    },

    /// No leave request exists with the given identifier.
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// The identifier that was looked up.
        id: LeaveRequestId,
    },

    /// The end date of a range precedes its start date.
    #[error("End date {end_date} should be greater or equal to the start date {start_date}")]
    InvalidRange {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// The calendar year cannot be represented as a date range.
    #[error("Year out of supported range: {year}")]
    InvalidYear {
        /// The requested year.
        year: i32,
    },

    /// A leave request asks for more days than the policy still allows.
    #[error(
        "Leave request{} exceeds the allowed days for '{policy}': requested {requested}, remaining {remaining}",
        year_suffix(.year)
    )]
    LimitExceeded {
        /// Title of the leave policy whose cap was hit.
        policy: String,
        /// Working days requested (within `year` when set).
        requested: u32,
        /// Days still available under the cap.
        remaining: u32,
        /// The offending calendar year, set when the request spans years.
        year: Option<i32>,
    },

    /// A leave request cannot move from its current status to the target.
    #[error("Cannot change leave request {id} from {from} to {to}")]
    InvalidStatusTransition {
        /// The leave request identifier.
        id: LeaveRequestId,
        /// The current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

fn year_suffix(year: &Option<i32>) -> String {
    year.map(|y| format!(" for {}", y)).unwrap_or_default()
}

/// A type alias for Results that return LeaveError.
pub type LeaveResult<T> = Result<T, LeaveError>;
