//! Leave policy model and its classification priority.
//!
//! A leave policy is a category of absence (annual leave, sick leave, remote
//! work, ...) with an annual allowance or unlimited status. When several leave
//! requests cover the same day, the [`PolicyKind`] of each request's policy
//! decides which one the day is attributed to.

use serde::{Deserialize, Serialize};

/// Identifier of a [`LeavePolicy`].
pub type LeavePolicyId = u64;

/// Represents a category of leave with its yearly allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique identifier for the policy.
    pub id: LeavePolicyId,
    /// Display name; also determines the policy's [`PolicyKind`].
    pub title: String,
    /// Whether the policy has no yearly cap.
    #[serde(default)]
    pub is_unlimited: bool,
    /// Days allowed per calendar year. Ignored when `is_unlimited` is set.
    #[serde(default)]
    pub allowed_days_per_year: Option<u32>,
}

impl LeavePolicy {
    /// Returns the yearly cap, or `None` when the policy is uncapped.
    ///
    /// A policy is uncapped when it is flagged unlimited or when no
    /// allowance is recorded for it.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::LeavePolicy;
    ///
    /// let remote = LeavePolicy {
    ///     id: 3,
    ///     title: "Remote Work".to_string(),
    ///     is_unlimited: true,
    ///     allowed_days_per_year: Some(10),
    /// };
    /// assert_eq!(remote.yearly_cap(), None);
    /// ```
    pub fn yearly_cap(&self) -> Option<u32> {
        if self.is_unlimited {
            None
        } else {
            self.allowed_days_per_year
        }
    }

    /// Returns the semantic kind of this policy, derived from its title.
    pub fn kind(&self) -> PolicyKind {
        PolicyKind::from_title(&self.title)
    }
}

/// The semantic kind of a leave policy.
///
/// Classification priority is attached to the kind, never to storage
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Sick leave.
    SickLeave,
    /// Annual (vacation) leave.
    AnnualLeave,
    /// Working remotely.
    RemoteWork,
    /// Any policy without a dedicated kind.
    Other,
}

impl PolicyKind {
    /// Maps a policy title onto its kind. Matching ignores case and
    /// surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::PolicyKind;
    ///
    /// assert_eq!(PolicyKind::from_title("Sick Leave"), PolicyKind::SickLeave);
    /// assert_eq!(PolicyKind::from_title(" annual leave "), PolicyKind::AnnualLeave);
    /// assert_eq!(PolicyKind::from_title("Parental Leave"), PolicyKind::Other);
    /// ```
    pub fn from_title(title: &str) -> Self {
        match title.trim().to_lowercase().as_str() {
            "sick leave" => PolicyKind::SickLeave,
            "annual leave" => PolicyKind::AnnualLeave,
            "remote work" => PolicyKind::RemoteWork,
            _ => PolicyKind::Other,
        }
    }

    /// Classification rank of the kind; the lowest rank wins a contested day.
    ///
    /// Unmapped policies rank 0 and therefore outrank every named kind.
    pub fn priority(self) -> u8 {
        match self {
            PolicyKind::Other => 0,
            PolicyKind::SickLeave => 1,
            PolicyKind::AnnualLeave => 2,
            PolicyKind::RemoteWork => 3,
        }
    }
}
