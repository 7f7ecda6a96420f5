//! Bookable slot generation for a single provider-local calendar day.
//!
//! Candidates are walked at a fixed granularity from each matching weekly
//! window's start until the slot would overrun the window end. A candidate is
//! offered only when it starts strictly after the notice cutoff and misses the
//! buffered extent of every conflict.
//!
//! [`Slots`] is lazy: it yields one accepted slot at a time, so callers that
//! only need to know whether a day has *any* capacity stop at the first hit.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::conflict::ConflictInterval;
use crate::error::Result;
use crate::localtime;
use crate::policy::{self, BookingPolicy, WeeklyWindow};

/// A candidate bookable interval of exactly the policy's slot length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Lazy sequence of the bookable slots on one day, in chronological order
/// within each window and in window order across windows.
///
/// Clone it to walk the same day again.
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    windows: Vec<(DateTime<Utc>, DateTime<Utc>)>,
    current: usize,
    cursor: Option<DateTime<Utc>>,
    conflicts: &'a [ConflictInterval],
    cutoff: DateTime<Utc>,
    duration: Duration,
    buffer: Duration,
    granularity: Duration,
}

impl<'a> Slots<'a> {
    /// Prepare the slot walk for `date`.
    ///
    /// Windows are matched on the weekday of `date` as a provider-local
    /// calendar date. A date outside `[today, today + max_advance_days)` has no
    /// slots.
    ///
    /// # Errors
    /// Returns [`crate::SlotError::InvalidPolicy`] for an out-of-domain policy
    /// or window weekday, and [`crate::SlotError::InvalidTimeSpecification`]
    /// for a matching window with a malformed clock string.
    pub fn new(
        date: NaiveDate,
        windows: &[WeeklyWindow],
        policy: &BookingPolicy,
        conflicts: &'a [ConflictInterval],
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        policy.validate()?;
        policy::validate_windows(windows)?;

        let today = localtime::local_date(now, tz);
        let resolved = if policy.within_horizon(date, today) {
            let weekday = localtime::weekday_index(date);
            windows
                .iter()
                .filter(|w| w.applies_to(weekday))
                .map(|w| w.resolve(date, tz))
                .collect::<Result<Vec<_>>>()?
        } else {
            debug!(%date, %today, "date outside booking horizon");
            Vec::new()
        };

        debug!(%date, windows = resolved.len(), conflicts = conflicts.len(), "walking slots");

        Ok(Self {
            windows: resolved,
            current: 0,
            cursor: None,
            conflicts,
            cutoff: policy.notice_cutoff(now),
            duration: policy.slot_duration(),
            buffer: policy.buffer(),
            granularity: policy.granularity(),
        })
    }

    fn accepts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if start <= self.cutoff {
            trace!(%start, "rejected: inside minimum notice");
            return false;
        }
        if let Some(c) = self
            .conflicts
            .iter()
            .find(|c| c.overlaps(start, end, self.buffer))
        {
            trace!(%start, conflict_start = %c.start, "rejected: conflict");
            return false;
        }
        true
    }
}

impl Iterator for Slots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        while let Some(&(window_start, window_end)) = self.windows.get(self.current) {
            let start = self.cursor.unwrap_or(window_start);
            let end = start + self.duration;

            if end > window_end {
                self.current += 1;
                self.cursor = None;
                continue;
            }

            self.cursor = Some(start + self.granularity);
            if self.accepts(start, end) {
                return Some(Slot { start, end });
            }
        }
        None
    }
}

/// All bookable slots on `date`. See [`Slots::new`] for the rules and errors.
pub fn generate_slots(
    date: NaiveDate,
    windows: &[WeeklyWindow],
    policy: &BookingPolicy,
    conflicts: &[ConflictInterval],
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<Vec<Slot>> {
    Ok(Slots::new(date, windows, policy, conflicts, tz, now)?.collect())
}

/// Whether `date` has at least one bookable slot. Stops at the first hit.
pub fn has_any_slot(
    date: NaiveDate,
    windows: &[WeeklyWindow],
    policy: &BookingPolicy,
    conflicts: &[ConflictInterval],
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<bool> {
    Ok(Slots::new(date, windows, policy, conflicts, tz, now)?
        .next()
        .is_some())
}
