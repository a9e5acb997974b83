//! Day classification logic.
//!
//! This module resolves every calendar day of a range into exactly one of
//! three meanings: a holiday, a day of leave, or an ordinary (work or
//! weekend) day. Holidays take precedence over leave, and leave takes
//! precedence over ordinary days.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{Holiday, LeavePolicy};

/// A leave request reduced to what the classifier needs: its inclusive date
/// range and the policy it was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSpan {
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The resolved leave policy.
    pub policy: LeavePolicy,
}

impl LeaveSpan {
    /// Checks if the span covers the given day.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// The resolved meaning of one calendar day.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::DayClassification;
/// use chrono::NaiveDate;
///
/// let day = DayClassification::Work {
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     is_weekend: false,
/// };
/// assert!(day.is_working_day());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayClassification {
    /// A holiday; wins over any leave covering the same day.
    Holiday {
        /// The classified day.
        date: NaiveDate,
        /// Name of the holiday.
        holiday_name: String,
    },
    /// A day covered by at least one leave request.
    Leave {
        /// The classified day.
        date: NaiveDate,
        /// The policy of the winning leave request.
        leave_policy: LeavePolicy,
        /// Whether the day is a Saturday or Sunday.
        is_weekend: bool,
    },
    /// A day with neither holiday nor leave.
    Work {
        /// The classified day.
        date: NaiveDate,
        /// Whether the day is a Saturday or Sunday.
        is_weekend: bool,
    },
}

impl DayClassification {
    /// Returns the classified day.
    pub fn date(&self) -> NaiveDate {
        match self {
            DayClassification::Holiday { date, .. }
            | DayClassification::Leave { date, .. }
            | DayClassification::Work { date, .. } => *date,
        }
    }

    /// Returns true for days that are neither weekend nor holiday and carry
    /// no leave.
    pub fn is_working_day(&self) -> bool {
        matches!(
            self,
            DayClassification::Work {
                is_weekend: false,
                ..
            }
        )
    }

    /// Returns the winning leave policy for leave days.
    pub fn leave_policy(&self) -> Option<&LeavePolicy> {
        match self {
            DayClassification::Leave { leave_policy, .. } => Some(leave_policy),
            _ => None,
        }
    }
}

/// Determines whether a date falls on a weekend.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// // 2024-03-09 is a Saturday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
/// // 2024-03-11 is a Monday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classifies every day of `[start_date, end_date]`.
///
/// # Arguments
///
/// * `start_date` - First day of the range (inclusive)
/// * `end_date` - Last day of the range (inclusive)
/// * `leave` - Leave spans that may cover days of the range
/// * `holidays` - Holidays that may fall within the range
///
/// # Returns
///
/// One [`DayClassification`] per calendar day, in ascending date order.
/// A reversed range yields an empty vector.
///
/// # Behavior
///
/// - A day matching a holiday is a [`DayClassification::Holiday`]
/// - Otherwise, if leave spans cover the day, the span whose policy kind has
///   the lowest [`priority`](crate::models::PolicyKind::priority) wins; among
///   equal priorities the first span in `leave` wins
/// - Otherwise the day is a [`DayClassification::Work`] day
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{classify_days, DayClassification, LeaveSpan};
/// use leave_engine::models::LeavePolicy;
/// use chrono::NaiveDate;
///
/// let sick = LeavePolicy {
///     id: 2,
///     title: "Sick Leave".to_string(),
///     is_unlimited: false,
///     allowed_days_per_year: Some(15),
/// };
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let spans = vec![LeaveSpan { start_date: monday, end_date: monday, policy: sick }];
///
/// let days = classify_days(monday, sunday, &spans, &[]);
/// assert_eq!(days.len(), 7);
/// assert!(matches!(days[0], DayClassification::Leave { .. }));
/// assert!(matches!(days[6], DayClassification::Work { is_weekend: true, .. }));
/// ```
pub fn classify_days(
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave: &[LeaveSpan],
    holidays: &[Holiday],
) -> Vec<DayClassification> {
    start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .map(|date| classify_day(date, leave, holidays))
        .collect()
}

/// Classifies a single day.
fn classify_day(date: NaiveDate, leave: &[LeaveSpan], holidays: &[Holiday]) -> DayClassification {
    if let Some(holiday) = holidays.iter().find(|h| h.date == date) {
        return DayClassification::Holiday {
            date,
            holiday_name: holiday.name.clone(),
        };
    }

    let is_weekend = is_weekend(date);

    // min_by_key keeps the first of several equal minimums
    let winner = leave
        .iter()
        .filter(|span| span.contains_date(date))
        .min_by_key(|span| span.policy.kind().priority());

    match winner {
        Some(span) => DayClassification::Leave {
            date,
            leave_policy: span.policy.clone(),
            is_weekend,
        },
        None => DayClassification::Work { date, is_weekend },
    }
}
