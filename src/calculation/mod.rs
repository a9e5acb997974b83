//! Calculation logic for the Leave Engine.
//!
//! This module contains the pure date computations: classifying each day of
//! a range as holiday, leave or ordinary day, tallying leave days into
//! per-policy entitlements, counting working days and checking requested
//! days against a policy's yearly allowance.

mod day_classification;
mod entitlement;
mod leave_capacity;

pub use day_classification::{DayClassification, LeaveSpan, classify_days, is_weekend};
pub use entitlement::{EmployeeEntitlements, Entitlement, tally_entitlements, year_bounds};
pub use leave_capacity::{check_capacity, count_working_days, working_days_by_year};
