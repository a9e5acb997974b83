//! Entitlement aggregation.
//!
//! Counts, per leave policy, how many days of a classified year were taken
//! as leave under that policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, LeavePolicy};

use super::DayClassification;

/// A leave policy together with the days already taken under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// The policy this entitlement refers to.
    #[serde(flatten)]
    pub policy: LeavePolicy,
    /// Days classified as leave under the policy in the queried year.
    pub already_taken: u32,
}

impl Entitlement {
    /// Returns the days still available, or `None` for uncapped policies.
    ///
    /// Never negative: a year that is already over its cap has zero left.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::calculation::Entitlement;
    /// use leave_engine::models::LeavePolicy;
    ///
    /// let entitlement = Entitlement {
    ///     policy: LeavePolicy {
    ///         id: 2,
    ///         title: "Sick Leave".to_string(),
    ///         is_unlimited: false,
    ///         allowed_days_per_year: Some(15),
    ///     },
    ///     already_taken: 12,
    /// };
    /// assert_eq!(entitlement.remaining(), Some(3));
    /// ```
    pub fn remaining(&self) -> Option<u32> {
        self.policy
            .yearly_cap()
            .map(|cap| cap.saturating_sub(self.already_taken))
    }
}

/// An employee and their entitlement for every leave policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEntitlements {
    /// The employee's details.
    pub details: Employee,
    /// One entry per leave policy, in policy order.
    pub entitlement: Vec<Entitlement>,
}

impl EmployeeEntitlements {
    /// Finds the entitlement entry of a policy.
    pub fn for_policy(&self, policy_id: u64) -> Option<&Entitlement> {
        self.entitlement.iter().find(|e| e.policy.id == policy_id)
    }
}

/// Returns the first and last day of a calendar year.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::year_bounds;
/// use chrono::NaiveDate;
///
/// let (start, end) = year_bounds(2024).unwrap();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
/// ```
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Tallies leave days per policy.
///
/// # Arguments
///
/// * `policies` - Every leave policy; each gets an entry even when unused
/// * `days` - Classified days of the period being tallied
///
/// # Returns
///
/// One [`Entitlement`] per policy, in the order of `policies`, whose
/// `already_taken` counts the `days` classified as leave under that policy.
pub fn tally_entitlements(
    policies: &[LeavePolicy],
    days: &[DayClassification],
) -> Vec<Entitlement> {
    policies
        .iter()
        .map(|policy| {
            let already_taken = days
                .iter()
                .filter(|day| day.leave_policy().is_some_and(|lp| lp.id == policy.id))
                .count() as u32;

            Entitlement {
                policy: policy.clone(),
                already_taken,
            }
        })
        .collect()
}
