//! Tests for local-time conversion, day bounds and DST resolution.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::localtime::{
    day_bounds, local_date, parse_local_time, parse_timezone, to_instant, weekday_index,
};
use slot_engine::SlotError;

const BRISBANE: Tz = chrono_tz::Australia::Brisbane;
const NEW_YORK: Tz = chrono_tz::America::New_York;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Conversion ──────────────────────────────────────────────────────────────

#[test]
fn brisbane_morning_is_previous_utc_day() {
    // Brisbane is UTC+10 all year.
    let instant = to_instant(date(2026, 3, 16), "09:00", BRISBANE).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 15, 23, 0, 0).unwrap());
}

#[test]
fn database_style_seconds_are_accepted() {
    let a = to_instant(date(2026, 3, 16), "09:30", BRISBANE).unwrap();
    let b = to_instant(date(2026, 3, 16), "09:30:00", BRISBANE).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_digit_hour_is_accepted() {
    let t = parse_local_time("9:05").unwrap();
    assert_eq!(t, chrono::NaiveTime::from_hms_opt(9, 5, 0).unwrap());
}

#[test]
fn malformed_local_times_are_rejected() {
    for bad in ["", "9am", "25:00", "24:00", "12:60", "12:3", "12:30:00:00", "ab:cd", "-1:00"] {
        let err = parse_local_time(bad).unwrap_err();
        assert!(
            matches!(err, SlotError::InvalidTimeSpecification(_)),
            "expected InvalidTimeSpecification for {:?}, got {:?}",
            bad,
            err
        );
    }
}

#[test]
fn unknown_timezone_is_invalid_time_specification() {
    let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimeSpecification(_)));
    assert!(err.to_string().contains("Mars/Olympus_Mons"));
}

#[test]
fn known_timezone_parses() {
    assert_eq!(parse_timezone("America/New_York").unwrap(), NEW_YORK);
}

// ── DST ─────────────────────────────────────────────────────────────────────

#[test]
fn spring_forward_gap_moves_forward_by_gap_length() {
    // 2026-03-08 02:30 does not exist in New York; it lands on 03:30 EDT.
    let instant = to_instant(date(2026, 3, 8), "02:30", NEW_YORK).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
    assert_eq!(
        instant.with_timezone(&NEW_YORK).format("%H:%M").to_string(),
        "03:30"
    );
}

#[test]
fn fall_back_ambiguity_takes_earlier_instant() {
    // 2026-11-01 01:30 happens twice in New York; the EDT occurrence is first.
    let instant = to_instant(date(2026, 11, 1), "01:30", NEW_YORK).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

// ── Day bounds ──────────────────────────────────────────────────────────────

#[test]
fn day_bounds_use_local_midnight_not_utc() {
    let (start, end) = day_bounds(date(2026, 3, 16), BRISBANE);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap());
}

#[test]
fn spring_forward_day_is_23_hours() {
    let (start, end) = day_bounds(date(2026, 3, 8), NEW_YORK);
    assert_eq!(end - start, Duration::hours(23));
}

#[test]
fn fall_back_day_is_25_hours() {
    let (start, end) = day_bounds(date(2026, 11, 1), NEW_YORK);
    assert_eq!(end - start, Duration::hours(25));
}

#[test]
fn consecutive_days_tile_without_gaps() {
    let (_, monday_end) = day_bounds(date(2026, 3, 16), BRISBANE);
    let (tuesday_start, _) = day_bounds(date(2026, 3, 17), BRISBANE);
    assert_eq!(monday_end, tuesday_start);
}

// ── Weekday ─────────────────────────────────────────────────────────────────

#[test]
fn weekday_follows_local_date_near_utc_midnight() {
    // Sunday 23:30 UTC is already Monday 09:30 in Brisbane.
    let instant = Utc.with_ymd_and_hms(2026, 3, 15, 23, 30, 0).unwrap();
    let local = local_date(instant, BRISBANE);
    assert_eq!(local, date(2026, 3, 16));
    assert_eq!(weekday_index(local), 1);
}

#[test]
fn sunday_is_zero_and_saturday_is_six() {
    assert_eq!(weekday_index(date(2026, 3, 15)), 0);
    assert_eq!(weekday_index(date(2026, 3, 21)), 6);
}
