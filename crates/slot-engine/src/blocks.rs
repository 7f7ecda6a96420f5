//! Administrative blocked periods (holidays, lunch breaks, personal time).
//!
//! A block is either pinned to one calendar date or recurs weekly on a
//! day-of-week, and is expressed in provider-local clock time.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::conflict::ConflictInterval;
use crate::error::{Result, SlotError};
use crate::localtime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedTime {
    /// One-off block on this local date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Weekly block on this weekday, `0` = Sunday through `6` = Saturday.
    #[serde(default)]
    pub day_of_week: Option<u8>,
    pub start_time: String,
    pub end_time: String,
}

impl BlockedTime {
    pub fn on_date(date: NaiveDate, start_time: &str, end_time: &str) -> Self {
        Self {
            date: Some(date),
            day_of_week: None,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    pub fn weekly(day_of_week: u8, start_time: &str, end_time: &str) -> Self {
        Self {
            date: None,
            day_of_week: Some(day_of_week),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// A block with both `date` and `day_of_week` set applies on its pinned
    /// date and on every matching weekday.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.date == Some(date) || self.day_of_week == Some(localtime::weekday_index(date))
    }

    /// Expand this block onto `date` as an unbuffered conflict.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidTimeSpecification`] if either clock string
    /// is malformed.
    pub fn to_conflict(&self, date: NaiveDate, tz: Tz) -> Result<ConflictInterval> {
        let start = localtime::to_instant(date, &self.start_time, tz)?;
        let end = localtime::to_instant(date, &self.end_time, tz)?;
        Ok(ConflictInterval::block(start, end))
    }
}

/// Expand every block that applies on `date` into unbuffered conflicts.
///
/// # Errors
/// Returns [`SlotError::InvalidPolicy`] for a weekday outside `0..=6`, or
/// [`SlotError::InvalidTimeSpecification`] for a malformed clock string.
pub fn blocks_on(blocked: &[BlockedTime], date: NaiveDate, tz: Tz) -> Result<Vec<ConflictInterval>> {
    if let Some(day) = blocked.iter().filter_map(|b| b.day_of_week).find(|d| *d > 6) {
        return Err(SlotError::InvalidPolicy(format!(
            "blocked time day_of_week must be 0..=6, got {}",
            day
        )));
    }

    blocked
        .iter()
        .filter(|b| b.applies_on(date))
        .map(|b| b.to_conflict(date, tz))
        .collect()
}
