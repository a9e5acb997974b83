//! Holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a [`Holiday`].
pub type HolidayId = u64;

/// A named non-working day.
///
/// # Example
///
/// ```
/// use leave_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     id: 1,
///     name: "New Year's Day".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// assert_eq!(serde_json::to_value(&holiday).unwrap()["date"], "2024-01-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Unique identifier for the holiday.
    pub id: HolidayId,
    /// The name of the holiday (e.g., "Christmas Day").
    pub name: String,
    /// The day the holiday falls on.
    pub date: NaiveDate,
}

impl Holiday {
    /// Checks if the holiday falls within `[start, end]`, inclusive.
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}
