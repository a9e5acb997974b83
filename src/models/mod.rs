//! Core data models for the Leave Engine.
//!
//! This module contains the persisted domain records: employees, leave
//! policies, leave requests and holidays.

mod employee;
mod holiday;
mod leave_policy;
mod leave_request;

pub use employee::{Employee, EmployeeId};
pub use holiday::{Holiday, HolidayId};
pub use leave_policy::{LeavePolicy, LeavePolicyId, PolicyKind};
pub use leave_request::{LeaveRequest, LeaveRequestId, LeaveStatus, NewLeaveRequest};
