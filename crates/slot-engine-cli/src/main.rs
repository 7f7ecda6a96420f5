//! `slots` CLI - bookable days and ranked slots from a calendar snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Dates with at least one bookable slot (horizon = policy max_advance_days)
//! slots dates -i snapshot.json
//!
//! # A shorter horizon, evaluated as of a fixed instant
//! slots dates -i snapshot.json --horizon 7 --now 2026-03-15T20:00:00Z
//!
//! # Scored slots for one provider-local day, snapshot on stdin
//! cat snapshot.json | slots day --date 2026-03-16
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::{debug, info};

mod snapshot;

use snapshot::{DatesOutput, DayOutput, ScoredSlotDto, Snapshot};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable days and ranked appointment slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (logs go to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List dates in the booking horizon that have a free slot
    Dates {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Evaluate as of this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<String>,
        /// Number of days to scan, starting today (defaults to max_advance_days)
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Show scored slots for one provider-local date
    Day {
        /// Date to inspect, YYYY-MM-DD in the provider's timezone
        #[arg(long)]
        date: String,
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Evaluate as of this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Dates {
            input,
            now,
            horizon,
        } => {
            let snapshot = load_snapshot(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;
            let tz = snapshot.tz()?;
            let policy = snapshot.effective_policy();
            let horizon = horizon.unwrap_or(policy.max_advance_days);

            debug!(timezone = tz.name(), horizon, "scanning available dates");
            let dates = slot_engine::scan_calendar(
                &snapshot.availability,
                &policy,
                &snapshot.bookings,
                &snapshot.blocks,
                horizon,
                tz,
                now,
            )
            .context("Failed to scan available dates")?;
            info!(available = dates.len(), "scan complete");

            let output = DatesOutput {
                dates: dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
                timezone: tz.name().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Day { date, input, now } => {
            let snapshot = load_snapshot(input.as_deref())?;
            let now = resolve_now(now.as_deref())?;
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", date))?;
            let tz = snapshot.tz()?;
            let policy = snapshot.effective_policy();

            let slots = slot_engine::day_view(
                date,
                &snapshot.availability,
                &policy,
                &snapshot.bookings,
                &snapshot.blocks,
                tz,
                now,
            )
            .with_context(|| format!("Failed to compute slots for {}", date))?;
            info!(%date, slots = slots.len(), "day computed");

            let output = DayOutput {
                slots: slots.iter().map(ScoredSlotDto::from).collect(),
                duration_mins: policy.slot_duration_mins,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn load_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let raw = read_input(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("Failed to parse calendar snapshot JSON")?;
    snapshot.policy.validate().context("Invalid booking policy")?;
    Ok(snapshot)
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now '{}', expected RFC 3339", raw)),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
