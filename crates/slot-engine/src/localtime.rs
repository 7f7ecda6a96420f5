//! Local wall-clock time → absolute instants in a provider's timezone.
//!
//! A provider's calendar day runs from local midnight to local midnight, so every
//! day boundary and weekday is computed in the provider's IANA timezone via
//! `chrono-tz`, never in UTC.
//!
//! ## DST resolution
//!
//! Wall-clock times that do not map to exactly one instant are resolved, not
//! rejected:
//!
//! - **Ambiguous** (fall-back overlap): the earlier of the two instants.
//! - **Non-existent** (spring-forward gap): interpreted with the UTC offset in
//!   force before the transition, which moves it forward by the length of the
//!   gap (02:30 in a one-hour gap becomes 03:30 local).

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Parse an IANA timezone identifier (e.g. `"Australia/Brisbane"`).
///
/// # Errors
/// Returns [`SlotError::InvalidTimeSpecification`] if the identifier is not in
/// the timezone database.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimeSpecification(format!("unknown timezone '{}'", timezone)))
}

/// Parse a local clock string in `HH:MM` or `HH:MM:SS` form.
///
/// The hour may be written with one digit (`9:00`); minutes and seconds must
/// have two. `24:00` is rejected.
///
/// # Errors
/// Returns [`SlotError::InvalidTimeSpecification`] for anything else.
pub fn parse_local_time(value: &str) -> Result<NaiveTime> {
    let invalid = || {
        SlotError::InvalidTimeSpecification(format!(
            "malformed local time '{}', expected HH:MM",
            value
        ))
    };

    let parts: Vec<&str> = value.trim().split(':').collect();
    let (hour, minute, second) = match parts.as_slice() {
        [h, m] => (*h, *m, "00"),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hour = digits(hour, 1..=2).ok_or_else(invalid)?;
    let minute = digits(minute, 2..=2).ok_or_else(invalid)?;
    let second = digits(second, 2..=2).ok_or_else(invalid)?;

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

fn digits(field: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !len.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Interpret `local_time` as a wall-clock time on `date` in `tz` and return the
/// corresponding UTC instant.
///
/// # Errors
/// Returns [`SlotError::InvalidTimeSpecification`] if `local_time` is malformed.
pub fn to_instant(date: NaiveDate, local_time: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let time = parse_local_time(local_time)?;
    Ok(resolve_local(date.and_time(time), tz))
}

/// Resolve a naive local datetime in `tz` to a UTC instant, applying the DST
/// policy described at module level.
pub fn resolve_local(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps never last a day, so the offset a day earlier is the one in
            // force before the transition.
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix()
                .local_minus_utc();
            Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(before))))
        }
    }
}

/// The half-open instant range `[00:00 local, next day's 00:00 local)` of
/// `date` in `tz`.
///
/// The range is 23 or 25 hours long on DST transition days.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = resolve_local(date.and_time(NaiveTime::MIN), tz);
    let end = date
        .succ_opt()
        .map_or(start + Duration::days(1), |next| {
            resolve_local(next.and_time(NaiveTime::MIN), tz)
        });
    (start, end)
}

/// The provider-local calendar date of an instant.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Day-of-week index of a provider-local calendar date, `0` = Sunday through
/// `6` = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // A NaiveDate is already a local calendar date; its weekday needs no
    // timezone adjustment.
    date.weekday().num_days_from_sunday() as u8
}
