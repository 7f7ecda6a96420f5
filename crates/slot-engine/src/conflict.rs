//! Busy intervals that candidate slots must avoid.
//!
//! Real bookings keep the policy buffer clear on both sides; administrative
//! blocks do not. Overlap is strict: a slot ending exactly where a buffered
//! extent begins (or starting exactly where it ends) is NOT a conflict.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::blocks::{self, BlockedTime};
use crate::error::Result;
use crate::localtime;

/// An existing booking, already converted to absolute instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A busy interval: either a real booking or an administrative block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Set for administrative blocks; suppresses the policy buffer.
    #[serde(default)]
    pub no_buffer: bool,
}

impl ConflictInterval {
    pub fn booking(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            no_buffer: false,
        }
    }

    pub fn block(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            no_buffer: true,
        }
    }

    /// `[start - buffer, end + buffer]`, or `[start, end]` for blocks.
    pub fn buffered_extent(&self, buffer: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
        let buffer = if self.no_buffer { Duration::zero() } else { buffer };
        (self.start - buffer, self.end + buffer)
    }

    /// Whether `[start, end)` intersects this interval's buffered extent.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>, buffer: Duration) -> bool {
        let (blocked_start, blocked_end) = self.buffered_extent(buffer);
        start < blocked_end && end > blocked_start
    }
}

impl From<&Booking> for ConflictInterval {
    fn from(b: &Booking) -> Self {
        ConflictInterval::booking(b.start, b.end)
    }
}

/// Bookings that reach into `date` in the provider's calendar once padded by
/// `buffer`, including ones that start the evening before or end after
/// midnight.
pub fn bookings_on<'a>(
    bookings: &'a [Booking],
    date: NaiveDate,
    tz: Tz,
    buffer: Duration,
) -> impl Iterator<Item = &'a Booking> + 'a {
    let (day_start, day_end) = localtime::day_bounds(date, tz);
    let from = day_start
        .checked_sub_signed(buffer)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let until = day_end
        .checked_add_signed(buffer)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    bookings
        .iter()
        .filter(move |b| b.start < until && b.end > from)
}

/// Everything a slot on `date` must avoid: the bookings reaching into that day
/// (buffered by `buffer`), followed by the blocks that apply to it (unbuffered).
///
/// # Errors
/// Returns [`crate::SlotError::InvalidTimeSpecification`] if an applicable block
/// carries a malformed clock string, or [`crate::SlotError::InvalidPolicy`] if a
/// block names an impossible weekday.
pub fn day_conflicts(
    bookings: &[Booking],
    blocked: &[BlockedTime],
    date: NaiveDate,
    tz: Tz,
    buffer: Duration,
) -> Result<Vec<ConflictInterval>> {
    let mut conflicts: Vec<ConflictInterval> = bookings_on(bookings, date, tz, buffer)
        .map(ConflictInterval::from)
        .collect();
    conflicts.extend(blocks::blocks_on(blocked, date, tz)?);
    Ok(conflicts)
}
