//! Multi-day scan for calendar dates with at least one bookable slot.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::conflict::ConflictInterval;
use crate::error::Result;
use crate::generator;
use crate::localtime;
use crate::policy::{self, BookingPolicy, WeeklyWindow};

/// The next `horizon_days` provider-local dates, starting with today.
pub fn horizon_dates(today: NaiveDate, horizon_days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..u64::from(horizon_days)).map_while(move |i| today.checked_add_days(Days::new(i)))
}

/// Dates in the next `horizon_days` (today first) that have a bookable slot.
///
/// Weekdays without a matching window are skipped without generating slots.
/// Dates missing from `conflicts_by_day` have no conflicts. Results are in
/// chronological order. Dates past the policy's `max_advance_days` never
/// qualify, whatever the horizon.
///
/// # Errors
/// Same as [`generator::Slots::new`].
pub fn scan_available_dates(
    windows: &[WeeklyWindow],
    policy: &BookingPolicy,
    conflicts_by_day: &HashMap<NaiveDate, Vec<ConflictInterval>>,
    horizon_days: u32,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<Vec<NaiveDate>> {
    policy.validate()?;
    policy::validate_windows(windows)?;

    let today = localtime::local_date(now, tz);
    let mut dates = Vec::new();

    for date in horizon_dates(today, horizon_days) {
        let weekday = localtime::weekday_index(date);
        if !windows.iter().any(|w| w.applies_to(weekday)) {
            continue;
        }

        let conflicts = conflicts_by_day.get(&date).map_or(&[][..], Vec::as_slice);
        if generator::has_any_slot(date, windows, policy, conflicts, tz, now)? {
            dates.push(date);
        }
    }

    debug!(%today, horizon_days, available = dates.len(), "scanned horizon");
    Ok(dates)
}
