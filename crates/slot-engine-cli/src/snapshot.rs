//! Snapshot input and JSON output shapes for the CLI.
//!
//! Instants cross the boundary as RFC 3339 strings in UTC, dates as
//! `YYYY-MM-DD` in the provider's timezone.

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{BlockedTime, Booking, BookingPolicy, ScoredSlot, WeeklyWindow, DEFAULT_TIMEZONE};

/// Everything the engine needs about one provider, as fetched by the caller.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub policy: BookingPolicy,
    /// Session length of the offer being booked; overrides the policy's slot length.
    #[serde(default)]
    pub duration_mins: Option<u32>,
    #[serde(default)]
    pub availability: Vec<WeeklyWindow>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub blocks: Vec<BlockedTime>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Snapshot {
    pub fn tz(&self) -> Result<Tz> {
        slot_engine::parse_timezone(&self.timezone).context("Invalid provider timezone")
    }

    pub fn effective_policy(&self) -> BookingPolicy {
        self.policy.with_duration(self.duration_mins)
    }
}

#[derive(Serialize)]
pub struct DatesOutput {
    pub dates: Vec<String>,
    pub timezone: String,
}

#[derive(Serialize)]
pub struct DayOutput {
    pub slots: Vec<ScoredSlotDto>,
    pub duration_mins: u32,
}

#[derive(Serialize)]
pub struct ScoredSlotDto {
    pub start: String,
    pub end: String,
    pub score: i32,
    pub recommended: bool,
}

impl From<&ScoredSlot> for ScoredSlotDto {
    fn from(s: &ScoredSlot) -> Self {
        Self {
            start: s.slot.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: s.slot.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            score: s.score,
            recommended: s.recommended,
        }
    }
}
