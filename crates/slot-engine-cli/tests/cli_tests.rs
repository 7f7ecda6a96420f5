//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the `dates` and `day`
//! subcommands against the snapshot fixture, over both file and stdin input.
//!
//! The fixture provider works Monday and Tuesday 09:00-17:00 in Brisbane
//! (UTC+10), has one booking on Monday 2026-03-16 10:00-11:00, a one-off block
//! over all of Tuesday 2026-03-17, and a weekly Monday block 15:00-16:00.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Monday 2026-03-16 06:00 in Brisbane.
const NOW: &str = "2026-03-15T20:00:00Z";

fn snapshot_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json")
}

fn bad_timezone_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bad_timezone.json")
}

fn snapshot_json() -> String {
    std::fs::read_to_string(snapshot_path()).expect("snapshot.json fixture must exist")
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// dates subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dates_defaults_to_policy_horizon() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "-i", snapshot_path(), "--now", NOW])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(
        json["dates"],
        serde_json::json!(["2026-03-16", "2026-03-23", "2026-03-24"])
    );
    assert_eq!(json["timezone"], "Australia/Brisbane");
}

#[test]
fn dates_with_short_horizon() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "-i", snapshot_path(), "--now", NOW, "--horizon", "7"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output)["dates"], serde_json::json!(["2026-03-16"]));
}

#[test]
fn dates_from_stdin() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "--now", NOW, "--horizon", "2"])
        .write_stdin(snapshot_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-16"))
        .stdout(predicate::str::contains("2026-03-17").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// day subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_lists_scored_slots_around_booking_and_block() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["day", "--date", "2026-03-16", "-i", snapshot_path(), "--now", NOW])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    let slots = json["slots"].as_array().unwrap();
    assert_eq!(json["duration_mins"], 60);
    // 11:15-14:00 every 15 minutes, then 16:00 after the block.
    assert_eq!(slots.len(), 13);

    // 11:15 local is back-to-back after the buffered booking.
    assert_eq!(slots[0]["start"], "2026-03-16T01:15:00Z");
    assert_eq!(slots[0]["end"], "2026-03-16T02:15:00Z");
    assert_eq!(slots[0]["score"], 1);
    assert_eq!(slots[0]["recommended"], false);

    assert_eq!(slots[12]["start"], "2026-03-16T06:00:00Z");
    assert!(slots
        .iter()
        .all(|s| s["start"] != "2026-03-16T05:00:00Z"));
}

#[test]
fn day_honours_offer_duration() {
    let mut snapshot: serde_json::Value = serde_json::from_str(&snapshot_json()).unwrap();
    snapshot["duration_mins"] = serde_json::json!(30);

    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["day", "--date", "2026-03-16", "--now", NOW])
        .write_stdin(snapshot.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["duration_mins"], 30);
    // A 30-minute 09:00 slot now fits before the booking's buffer.
    assert_eq!(json["slots"][0]["start"], "2026-03-15T23:00:00Z");
    assert_eq!(json["slots"][0]["end"], "2026-03-15T23:30:00Z");
}

#[test]
fn blocked_day_has_no_slots() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["day", "--date", "2026-03-17", "-i", snapshot_path(), "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slots\": []"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unknown_timezone_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "-i", bad_timezone_path(), "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider timezone"));
}

#[test]
fn malformed_date_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["day", "--date", "16/03/2026", "-i", snapshot_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --date"));
}

#[test]
fn malformed_now_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "-i", snapshot_path(), "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now"));
}

#[test]
fn invalid_json_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("dates")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar snapshot JSON"));
}

#[test]
fn zero_duration_policy_fails() {
    let input = r#"{"policy": {"slot_duration_mins": 0}, "availability": []}"#;
    Command::cargo_bin("slots")
        .unwrap()
        .arg("dates")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid booking policy"));
}

#[test]
fn missing_file_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["dates", "-i", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
