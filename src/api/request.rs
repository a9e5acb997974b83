//! Request types for the Leave Engine API.
//!
//! Leave submissions are deserialized straight into
//! [`LeaveRequestInput`](crate::service::LeaveRequestInput); the types here
//! cover the query strings and the status update body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{LeaveRequestId, LeaveStatus};

/// Query string for the date range endpoints (`/employees/timesheet`,
/// `/holidays`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for `POST /leave-requests/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The leave request to update.
    pub id: LeaveRequestId,
    /// The target status.
    pub status: LeaveStatus,
}
