//! Working-day counting and entitlement capacity checks for leave requests.
//!
//! A leave request consumes only working days (days that are neither
//! weekends nor holidays). Requests spanning several calendar years are split
//! per year, and each year must fit into that year's remaining allowance on
//! its own.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::error::{LeaveError, LeaveResult};

use super::{DayClassification, Entitlement};

/// Counts the working days among classified days.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{classify_days, count_working_days};
/// use chrono::NaiveDate;
///
/// // Monday 2024-03-04 through Sunday 2024-03-10
/// let days = classify_days(
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
///     &[],
///     &[],
/// );
/// assert_eq!(count_working_days(&days), 5);
/// ```
pub fn count_working_days(days: &[DayClassification]) -> u32 {
    days.iter().filter(|day| day.is_working_day()).count() as u32
}

/// Groups the working days among classified days by calendar year.
///
/// Years without working days are omitted.
pub fn working_days_by_year(days: &[DayClassification]) -> BTreeMap<i32, u32> {
    let mut by_year = BTreeMap::new();
    for day in days.iter().filter(|day| day.is_working_day()) {
        *by_year.entry(day.date().year()).or_insert(0) += 1;
    }
    by_year
}

/// Checks that `requested` days fit into an entitlement.
///
/// # Arguments
///
/// * `entitlement` - The policy's entitlement for the year, if any
/// * `policy_title` - Title reported when no entitlement entry exists
/// * `requested` - Working days requested within the year
/// * `year` - The year to report in the error, for multi-year requests
///
/// # Returns
///
/// `Ok(())` when the entry exists and either the policy is uncapped or its
/// remaining days cover the request; otherwise [`LeaveError::LimitExceeded`].
pub fn check_capacity(
    entitlement: Option<&Entitlement>,
    policy_title: &str,
    requested: u32,
    year: Option<i32>,
) -> LeaveResult<()> {
    let Some(entitlement) = entitlement else {
        return Err(LeaveError::LimitExceeded {
            policy: policy_title.to_string(),
            requested,
            remaining: 0,
            year,
        });
    };

    match entitlement.remaining() {
        Some(remaining) if remaining < requested => Err(LeaveError::LimitExceeded {
            policy: entitlement.policy.title.clone(),
            requested,
            remaining,
            year,
        }),
        _ => Ok(()),
    }
}
