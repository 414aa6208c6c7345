//! `barber` CLI -- query slot availability and check bookings and
//! cancellations against a snapshot of the shop's appointments.
//!
//! ## Usage
//!
//! ```sh
//! # Free HAIR slots on a date
//! barber -a appointments.json slots --date 2026-03-16 --service HAIR
//!
//! # Earliest combo slot from today onwards
//! barber -a appointments.json next --service HAIR_AND_BEARD
//!
//! # Would this booking be accepted?
//! barber -a appointments.json book --date 2026-03-16 --time 10:00 --service BEARD --user ana
//!
//! # May appointment 42 be canceled (by its owner, or by staff)?
//! barber -a appointments.json cancel --id 42 --user ana
//! barber -a appointments.json cancel --id 42 --user staff --admin
//!
//! # Day overview
//! barber -a appointments.json schedule --date 2026-03-16
//! ```
//!
//! `--now` pins the clock (shop-local time), `--config` reads a TOML shop
//! config, `--json` switches output to JSON.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use serde_json::json;
use slot_engine::{
    busy_blocks, day_schedule, free_windows, BookingRequest, CancelRole, Clock,
    ConflictEvaluator, FixedClock, InMemoryAppointments, ServiceType, SlotGenerator, UserId,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ShopConfig;

#[derive(Parser)]
#[command(
    name = "barber",
    version,
    about = "Barbershop slot availability and booking checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with the current appointments (empty book if omitted)
    #[arg(short, long, global = true)]
    appointments: Option<PathBuf>,

    /// TOML shop config (defaults if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pin the clock to this shop-local time, e.g. 2026-03-16T10:15
    #[arg(long, global = true)]
    now: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable start times for a service on a date
    Slots {
        #[arg(short, long)]
        date: NaiveDate,
        #[arg(short, long)]
        service: ServiceType,
    },
    /// Find the earliest bookable slot within the booking horizon
    Next {
        #[arg(short, long)]
        service: ServiceType,
        /// First date to search (today if omitted)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Check whether a booking would be accepted
    Book {
        #[arg(short, long)]
        date: NaiveDate,
        /// Start time, HH:MM
        #[arg(short, long, value_parser = parse_time)]
        time: NaiveTime,
        #[arg(short, long)]
        service: ServiceType,
        #[arg(short, long)]
        user: String,
    },
    /// Check whether an appointment may be canceled
    Cancel {
        #[arg(long)]
        id: u64,
        #[arg(short, long)]
        user: String,
        /// Cancel as shop staff
        #[arg(long)]
        admin: bool,
    },
    /// Show the day's appointments, busy blocks and free windows
    Schedule {
        #[arg(short, long)]
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let config = ShopConfig::load(cli.config.as_deref())?;
    let store = read_appointments(cli.appointments.as_deref())?;
    let clock: Box<dyn Clock> = match cli.now.as_deref() {
        Some(raw) => Box::new(FixedClock(parse_now(raw)?)),
        None => Box::new(config.system_clock()?),
    };
    debug!(
        appointments = store.all().len(),
        now = %clock.now(),
        timezone = %config.timezone,
        "engine ready"
    );

    let evaluator = ConflictEvaluator::with_rules(&store, clock.as_ref(), config.rules.clone())?;
    let generator = SlotGenerator::new(evaluator);

    match cli.command {
        Commands::Slots { date, service } => {
            let slots = generator.available_slots(date, service)?;
            info!(%date, %service, count = slots.len(), "computed available slots");
            if cli.json {
                print_json(&json!({
                    "date": date,
                    "service": service,
                    "slots": slots.iter().map(|s| hhmm(*s)).collect::<Vec<_>>(),
                }))?;
            } else {
                for slot in slots {
                    println!("{}", hhmm(slot));
                }
            }
        }
        Commands::Next { service, from } => {
            let from = from.unwrap_or_else(|| clock.today());
            let next = generator.next_available(from, service)?;
            match (next, cli.json) {
                (Some((date, time)), true) => {
                    print_json(&json!({ "date": date, "time": hhmm(time), "service": service }))?
                }
                (Some((date, time)), false) => println!("{} {}", date, hhmm(time)),
                (None, true) => print_json(&json!(null))?,
                (None, false) => println!(
                    "No {} availability before {}",
                    service,
                    config.rules.horizon_end(clock.today())
                ),
            }
        }
        Commands::Book {
            date,
            time,
            service,
            user,
        } => {
            let request = BookingRequest {
                date,
                time,
                service,
                requester: UserId::new(user),
            };
            let evaluator = generator.evaluator();
            if let Err(err) = evaluator.validate_new_booking(&request) {
                for overlap in evaluator.overlaps_for(&request)? {
                    debug!(
                        id = overlap.appointment.id,
                        service = %overlap.appointment.service,
                        time = %hhmm(overlap.appointment.time),
                        minutes = overlap.overlap_minutes,
                        "overlapping appointment"
                    );
                }
                warn!(%date, time = %hhmm(time), %service, kind = ?err.kind(), "booking rejected");
                return Err(err).context("Booking rejected");
            }
            info!(%date, time = %hhmm(time), %service, "booking accepted");
            if cli.json {
                print_json(&json!({ "accepted": true, "request": request }))?;
            } else {
                println!("OK: {} on {} at {} can be booked", service, date, hhmm(time));
            }
        }
        Commands::Cancel { id, user, admin } => {
            let appointment = store.find(id)?;
            let role = if admin {
                CancelRole::Admin
            } else {
                CancelRole::Owner
            };
            if let Err(err) =
                generator
                    .evaluator()
                    .validate_cancellation(appointment, &UserId::new(user), role)
            {
                warn!(id, ?role, kind = ?err.kind(), "cancellation rejected");
                return Err(err).context("Cancellation rejected");
            }
            info!(id, ?role, "cancellation accepted");
            if cli.json {
                print_json(&json!({ "accepted": true, "id": id }))?;
            } else {
                println!("OK: appointment {} can be canceled", id);
            }
        }
        Commands::Schedule { date } => {
            let appointments = day_schedule(&store, date)?;
            let busy = busy_blocks(&appointments, date, &config.rules);
            let free = free_windows(&appointments, date, &config.rules);
            if cli.json {
                print_json(&json!({
                    "date": date,
                    "appointments": appointments,
                    "busy": busy,
                    "free": free,
                }))?;
            } else {
                println!("Appointments on {}:", date);
                for a in &appointments {
                    println!("  {}  {:<15} {} (#{})", hhmm(a.time), a.service.as_str(), a.owner, a.id);
                }
                println!("Free:");
                for window in &free {
                    println!(
                        "  {}-{}  {} min",
                        hhmm(window.start),
                        hhmm(window.end),
                        window.duration_minutes
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    let default = if verbose { "barber=debug" } else { "barber=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init();
    }
}

fn read_appointments(path: Option<&Path>) -> Result<InMemoryAppointments> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            InMemoryAppointments::from_json(&raw)
                .with_context(|| format!("Failed to load appointments: {}", path.display()))
        }
        None => Ok(InMemoryAppointments::default()),
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}', expected HH:MM", raw))
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("Invalid --now '{}', expected YYYY-MM-DDTHH:MM", raw))
}

fn hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
