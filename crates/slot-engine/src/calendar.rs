//! Entry points that work from raw calendar rows instead of pre-expanded
//! conflicts: the bookable-days calendar and the scored slots of one day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::blocks::BlockedTime;
use crate::conflict::{self, Booking, ConflictInterval};
use crate::error::Result;
use crate::generator;
use crate::localtime;
use crate::policy::{BookingPolicy, WeeklyWindow};
use crate::scanner;
use crate::scorer::{self, ScoredSlot};

/// Dates in the next `horizon_days` with at least one bookable slot, given
/// every booking and blocked time the provider has.
///
/// Bookings are assigned to the local day their start falls on; blocks are
/// expanded onto each date they apply to.
///
/// # Errors
/// Same as [`scanner::scan_available_dates`], plus malformed blocks.
pub fn scan_calendar(
    windows: &[WeeklyWindow],
    policy: &BookingPolicy,
    bookings: &[Booking],
    blocked: &[BlockedTime],
    horizon_days: u32,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<Vec<NaiveDate>> {
    let today = localtime::local_date(now, tz);
    let buffer = policy.buffer();
    let conflicts_by_day = scanner::horizon_dates(today, horizon_days)
        .filter(|date| {
            let weekday = localtime::weekday_index(*date);
            windows.iter().any(|w| w.applies_to(weekday))
        })
        .map(|date| conflict::day_conflicts(bookings, blocked, date, tz, buffer).map(|c| (date, c)))
        .collect::<Result<HashMap<NaiveDate, Vec<ConflictInterval>>>>()?;

    scanner::scan_available_dates(windows, policy, &conflicts_by_day, horizon_days, tz, now)
}

/// The scored bookable slots of `date`.
///
/// Slots avoid both bookings and blocks; scores only consider bookings.
///
/// # Errors
/// Same as [`generator::Slots::new`], plus malformed blocks.
pub fn day_view(
    date: NaiveDate,
    windows: &[WeeklyWindow],
    policy: &BookingPolicy,
    bookings: &[Booking],
    blocked: &[BlockedTime],
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<Vec<ScoredSlot>> {
    let conflicts = conflict::day_conflicts(bookings, blocked, date, tz, policy.buffer())?;
    let slots = generator::generate_slots(date, windows, policy, &conflicts, tz, now)?;

    Ok(scorer::score_slots(
        &slots,
        policy.slot_duration_mins,
        &conflicts,
        policy.buffer_between_mins,
    ))
}
