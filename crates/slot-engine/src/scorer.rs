//! Rank generated slots by how little idle time they leave around existing
//! bookings.
//!
//! Each real booking contributes to a slot's score:
//!
//! | Condition                                                | Score |
//! |----------------------------------------------------------|-------|
//! | slot starts within 1 min of `booking.end + buffer`       | +3    |
//! | slot ends within 1 min of `booking.start - buffer`       | +2    |
//! | `0 < slot.start - booking.end < 30 min`                  | -2    |
//! | `0 < booking.start - slot.end < 30 min`                  | -2    |
//! | `slot.start - booking.end` is `0` or at least 30 min     | +1    |
//!
//! Administrative blocks never affect the score.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::ConflictInterval;
use crate::generator::Slot;

const BACK_TO_BACK_AFTER: i32 = 3;
const BACK_TO_BACK_BEFORE: i32 = 2;
const AWKWARD_GAP_PENALTY: i32 = 2;
const CLEAN_GAP_BONUS: i32 = 1;
const RECOMMEND_THRESHOLD: i32 = 2;

fn adjacency_tolerance() -> Duration {
    Duration::minutes(1)
}

fn awkward_gap() -> Duration {
    Duration::minutes(30)
}

/// A slot with its desirability score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSlot {
    #[serde(flatten)]
    pub slot: Slot,
    pub score: i32,
    /// True when the day has no real bookings, or the score reaches 2.
    pub recommended: bool,
}

/// Score every slot against the real bookings in `bookings`.
///
/// Slot ends are recomputed as `start + duration_mins`. Entries flagged
/// `no_buffer` are administrative blocks and are skipped.
pub fn score_slots(
    slots: &[Slot],
    duration_mins: u32,
    bookings: &[ConflictInterval],
    buffer_mins: u32,
) -> Vec<ScoredSlot> {
    let real: Vec<&ConflictInterval> = bookings.iter().filter(|b| !b.no_buffer).collect();
    let duration = Duration::minutes(i64::from(duration_mins));
    let buffer = Duration::minutes(i64::from(buffer_mins));

    slots
        .iter()
        .map(|slot| {
            let start = slot.start;
            let end = start + duration;
            let score: i32 = real
                .iter()
                .map(|b| score_against(start, end, b, buffer))
                .sum();

            ScoredSlot {
                slot: Slot { start, end },
                score,
                recommended: real.is_empty() || score >= RECOMMEND_THRESHOLD,
            }
        })
        .collect()
}

fn score_against(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    booking: &ConflictInterval,
    buffer: Duration,
) -> i32 {
    let mut score = 0;

    if (start - (booking.end + buffer)).abs() < adjacency_tolerance() {
        score += BACK_TO_BACK_AFTER;
    }
    if (end - (booking.start - buffer)).abs() < adjacency_tolerance() {
        score += BACK_TO_BACK_BEFORE;
    }

    let gap_before = start - booking.end;
    let gap_after = booking.start - end;

    if gap_before > Duration::zero() && gap_before < awkward_gap() {
        score -= AWKWARD_GAP_PENALTY;
    }
    if gap_after > Duration::zero() && gap_after < awkward_gap() {
        score -= AWKWARD_GAP_PENALTY;
    }
    if gap_before == Duration::zero() || gap_before >= awkward_gap() {
        score += CLEAN_GAP_BONUS;
    }

    score
}
