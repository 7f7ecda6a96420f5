//! Provider configuration: weekly availability windows and booking policy.
//!
//! Both are caller-owned snapshots loaded from the provider's configuration
//! store; the engine never mutates them.

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::localtime;

/// Provider timezone used when a configuration snapshot does not name one.
pub const DEFAULT_TIMEZONE: &str = "Australia/Brisbane";

/// Step between candidate slot starts when a policy does not set one.
pub const DEFAULT_GRANULARITY_MINS: u32 = 15;

/// A standing weekly window during which the provider accepts bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    /// `0` = Sunday through `6` = Saturday.
    pub day_of_week: u8,
    /// Local opening time, `HH:MM`.
    pub start_time: String,
    /// Local closing time, `HH:MM`.
    pub end_time: String,
}

impl WeeklyWindow {
    pub fn new(day_of_week: u8, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// Whether this window recurs on the given weekday index.
    pub fn applies_to(&self, weekday: u8) -> bool {
        self.day_of_week == weekday
    }

    /// The window's `[start, end)` instants on a concrete local date.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidTimeSpecification`] if either clock string
    /// is malformed.
    pub fn resolve(&self, date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let start = localtime::to_instant(date, &self.start_time, tz)?;
        let end = localtime::to_instant(date, &self.end_time, tz)?;
        Ok((start, end))
    }
}

/// Check that every window names a real weekday.
pub fn validate_windows(windows: &[WeeklyWindow]) -> Result<()> {
    match windows.iter().find(|w| w.day_of_week > 6) {
        Some(w) => Err(SlotError::InvalidPolicy(format!(
            "day_of_week must be 0..=6, got {}",
            w.day_of_week
        ))),
        None => Ok(()),
    }
}

/// Lead time, horizon, slot length and spacing rules for a provider.
///
/// Missing fields deserialize to the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    /// Minimum lead time between "now" and a slot's start.
    pub min_notice_hours: u32,
    /// Number of provider-local calendar days, starting today, that accept bookings.
    pub max_advance_days: u32,
    /// Length of every offered slot.
    pub slot_duration_mins: u32,
    /// Gap kept clear on both sides of an existing booking.
    pub buffer_between_mins: u32,
    /// Step between candidate slot starts within a window.
    pub slot_granularity_mins: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_notice_hours: 24,
            max_advance_days: 30,
            slot_duration_mins: 60,
            buffer_between_mins: 0,
            slot_granularity_mins: DEFAULT_GRANULARITY_MINS,
        }
    }
}

impl BookingPolicy {
    /// Reject policies outside their domain.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidPolicy`] when the slot duration, granularity
    /// or advance horizon is zero.
    pub fn validate(&self) -> Result<()> {
        if self.slot_duration_mins == 0 {
            return Err(SlotError::InvalidPolicy(
                "slot_duration_mins must be greater than 0".to_string(),
            ));
        }
        if self.slot_granularity_mins == 0 {
            return Err(SlotError::InvalidPolicy(
                "slot_granularity_mins must be greater than 0".to_string(),
            ));
        }
        if self.max_advance_days == 0 {
            return Err(SlotError::InvalidPolicy(
                "max_advance_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The same policy with the slot length replaced by an offer's session
    /// length. `None` or `0` keeps the provider default.
    pub fn with_duration(&self, duration_mins: Option<u32>) -> Self {
        match duration_mins {
            Some(mins) if mins > 0 => Self {
                slot_duration_mins: mins,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_duration_mins))
    }

    pub fn buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_between_mins))
    }

    pub fn granularity(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_granularity_mins))
    }

    /// Slots must start strictly after this instant.
    ///
    /// A notice period reaching past the representable range saturates to
    /// `DateTime::<Utc>::MAX_UTC`, so nothing is bookable.
    pub fn notice_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_hours(i64::from(self.min_notice_hours))
            .and_then(|notice| now.checked_add_signed(notice))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether `date` falls in `[today, today + max_advance_days)`.
    pub fn within_horizon(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return false;
        }
        match today.checked_add_days(Days::new(u64::from(self.max_advance_days))) {
            Some(limit) => date < limit,
            None => true,
        }
    }
}
