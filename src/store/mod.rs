//! Persistence seam for the Leave Engine.
//!
//! The engine reads employees, leave policies, holidays and leave requests
//! through the [`LeaveStore`] trait and writes only leave requests.
//! [`InMemoryStore`] is the bundled implementation, seeded from
//! configuration.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::LeaveResult;
use crate::models::{
    Employee, EmployeeId, Holiday, LeavePolicy, LeavePolicyId, LeaveRequest, LeaveRequestId,
    LeaveStatus, NewLeaveRequest,
};

pub use memory::InMemoryStore;

/// Criteria for selecting leave requests. Empty criteria select everything.
///
/// # Example
///
/// ```
/// use leave_engine::store::LeaveRequestFilter;
/// use leave_engine::models::LeaveStatus;
/// use chrono::NaiveDate;
///
/// let filter = LeaveRequestFilter::default()
///     .employee(1)
///     .overlapping(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     )
///     .statuses(&[LeaveStatus::Approved]);
/// assert_eq!(filter.employee_id, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveRequestFilter {
    /// Only requests of this employee.
    pub employee_id: Option<EmployeeId>,
    /// Only requests sharing at least one day with this inclusive range.
    pub overlapping: Option<(NaiveDate, NaiveDate)>,
    /// Only requests in one of these states.
    pub statuses: Option<Vec<LeaveStatus>>,
}

impl LeaveRequestFilter {
    /// Restricts the filter to one employee.
    pub fn employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Restricts the filter to requests overlapping `[start, end]`.
    pub fn overlapping(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.overlapping = Some((start, end));
        self
    }

    /// Restricts the filter to the given states.
    pub fn statuses(mut self, statuses: &[LeaveStatus]) -> Self {
        self.statuses = Some(statuses.to_vec());
        self
    }

    /// Restricts the filter to the states whose days count as taken.
    pub fn counting_as_taken(self) -> Self {
        let statuses: Vec<LeaveStatus> = LeaveStatus::ALL
            .into_iter()
            .filter(|status| status.counts_as_taken())
            .collect();
        self.statuses(&statuses)
    }

    /// Checks if a request satisfies every criterion.
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        self.employee_id.is_none_or(|id| request.employee_id == id)
            && self
                .overlapping
                .is_none_or(|(start, end)| request.overlaps(start, end))
            && self
                .statuses
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&request.status))
    }
}

/// Storage for the records the engine works with.
///
/// Listings return records ordered by identifier (holidays by date).
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Finds an employee by identifier.
    async fn employee(&self, id: EmployeeId) -> LeaveResult<Option<Employee>>;

    /// Lists every employee.
    async fn employees(&self) -> LeaveResult<Vec<Employee>>;

    /// Finds a leave policy by identifier.
    async fn leave_policy(&self, id: LeavePolicyId) -> LeaveResult<Option<LeavePolicy>>;

    /// Lists every leave policy.
    async fn leave_policies(&self) -> LeaveResult<Vec<LeavePolicy>>;

    /// Lists the holidays falling within `[start, end]`.
    async fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate)
    -> LeaveResult<Vec<Holiday>>;

    /// Finds a leave request by identifier.
    async fn leave_request(&self, id: LeaveRequestId) -> LeaveResult<Option<LeaveRequest>>;

    /// Lists the leave requests matching `filter`.
    async fn leave_requests(&self, filter: &LeaveRequestFilter) -> LeaveResult<Vec<LeaveRequest>>;

    /// Stores a new leave request in the `pending` state.
    async fn insert_leave_request(&self, request: NewLeaveRequest) -> LeaveResult<LeaveRequest>;

    /// Sets the status of a leave request, returning the updated record, or
    /// `None` if no such request exists.
    async fn set_leave_request_status(
        &self,
        id: LeaveRequestId,
        status: LeaveStatus,
    ) -> LeaveResult<Option<LeaveRequest>>;
}
