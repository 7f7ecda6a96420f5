//! # slot-engine
//!
//! Bookable time slots for appointment-based service businesses.
//!
//! Given a provider's weekly availability pattern, existing bookings and
//! administrative blocks, the engine computes which start times can still be
//! booked on a day, ranks them so the calendar stays dense, and answers which
//! days in the booking horizon have any capacity at all. Every day boundary
//! and weekday is computed in the provider's IANA timezone via `chrono-tz`.
//!
//! The engine is pure: callers fetch configuration and calendar rows, pass them
//! in along with "now", and serialize the results themselves.
//!
//! ## Modules
//!
//! - [`localtime`]: local clock time → UTC instants, calendar-day bounds, DST policy
//! - [`policy`]: weekly availability windows and booking policy
//! - [`conflict`]: bookings and busy intervals with per-interval buffers
//! - [`blocks`]: one-off and weekly administrative blocks
//! - [`generator`]: bookable slots for one day (lazy)
//! - [`scorer`]: back-to-back / idle-gap ranking
//! - [`scanner`]: which dates in a horizon have capacity
//! - [`calendar`]: the above, driven from raw booking and block rows
//! - [`error`]: error types

pub mod blocks;
pub mod calendar;
pub mod conflict;
pub mod error;
pub mod generator;
pub mod localtime;
pub mod policy;
pub mod scanner;
pub mod scorer;

pub use blocks::BlockedTime;
pub use calendar::{day_view, scan_calendar};
pub use conflict::{Booking, ConflictInterval};
pub use error::SlotError;
pub use generator::{generate_slots, has_any_slot, Slot, Slots};
pub use localtime::{day_bounds, parse_timezone, to_instant};
pub use policy::{BookingPolicy, WeeklyWindow, DEFAULT_TIMEZONE};
pub use scanner::scan_available_dates;
pub use scorer::{score_slots, ScoredSlot};
