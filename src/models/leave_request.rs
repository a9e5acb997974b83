//! Leave request model and its status lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, LeavePolicyId};

/// Identifier of a [`LeaveRequest`].
pub type LeaveRequestId = u64;

/// Lifecycle state of a leave request.
///
/// Requests start `Pending` and move exactly once, to `Approved` or
/// `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting a decision.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
}

impl LeaveStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [LeaveStatus; 3] = [
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
    ];

    /// Returns true if a request in this state may move to `target`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::LeaveStatus;
    ///
    /// assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Approved));
    /// assert!(!LeaveStatus::Approved.can_transition_to(LeaveStatus::Rejected));
    /// assert!(!LeaveStatus::Pending.can_transition_to(LeaveStatus::Pending));
    /// ```
    pub fn can_transition_to(self, target: LeaveStatus) -> bool {
        matches!(
            (self, target),
            (LeaveStatus::Pending, LeaveStatus::Approved)
                | (LeaveStatus::Pending, LeaveStatus::Rejected)
        )
    }

    /// Returns true if days under a request in this state count as taken.
    pub fn counts_as_taken(self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A stored leave request covering an inclusive range of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: LeaveRequestId,
    /// The employee who asked for leave.
    pub employee_id: EmployeeId,
    /// The policy the leave is taken under.
    pub leave_policy_id: LeavePolicyId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Current lifecycle state.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Checks if the request covers the given day.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if the request shares at least one day with `[start, end]`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest {
    ///     id: 1,
    ///     employee_id: 1,
    ///     leave_policy_id: 1,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    ///     status: LeaveStatus::Pending,
    /// };
    ///
    /// let jan_1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let dec_31 = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    /// assert!(request.overlaps(jan_1, dec_31));
    /// ```
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

/// The fields of a leave request before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// The employee who asked for leave.
    pub employee_id: EmployeeId,
    /// The policy the leave is taken under.
    pub leave_policy_id: LeavePolicyId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
}
