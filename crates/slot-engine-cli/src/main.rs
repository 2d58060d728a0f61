//! `slots` CLI — provider availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Slot grid for a provider on a date
//! slots generate -s dr-rao.json -d 2026-03-16 -a appointments.json
//!
//! # Only the open slots, as JSON
//! slots generate -s dr-rao.json -d 2026-03-16 --available-only --json
//!
//! # Is 08:30-09:00 inside working hours?
//! slots validate -s dr-rao.json -d 2026-03-16 --start 08:30 --end 09:00
//!
//! # Full booking check, ignoring the appointment being moved
//! slots check -s dr-rao.json -d 2026-03-16 -a appointments.json \
//!     --start 09:00 --end 09:30 --exclude apt-001
//!
//! # Free stretches of at least 45 minutes
//! slots free -s dr-rao.json -d 2026-03-16 --min 45
//! ```
//!
//! Rejections exit with status 2. Log output goes to stderr and is filtered
//! by `SLOTS_LOG` (default `warn`); `-v` forces `debug`.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    Appointment, BookingService, InMemoryAppointmentRepository, Interval, ProviderSchedule,
    SchedulingError, Slot, TimeOfDay,
};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status for a rejected candidate.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Provider appointment slot engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level to stderr (overrides SLOTS_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct DayArgs {
    /// Provider schedule JSON file
    #[arg(short, long)]
    schedule: String,
    /// Date to look at (YYYY-MM-DD)
    #[arg(short, long)]
    date: NaiveDate,
    /// Appointments JSON file (no bookings if omitted)
    #[arg(short, long)]
    appointments: Option<String>,
}

#[derive(Args)]
struct CandidateArgs {
    /// Start of the proposed appointment (HH:MM)
    #[arg(long)]
    start: TimeOfDay,
    /// End of the proposed appointment (HH:MM)
    #[arg(long)]
    end: TimeOfDay,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the slot grid for a provider on a date
    Generate {
        #[command(flatten)]
        day: DayArgs,
        /// Only print slots that can still be booked
        #[arg(long)]
        available_only: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check a proposed appointment against working hours only
    Validate {
        #[command(flatten)]
        day: DayArgs,
        #[command(flatten)]
        candidate: CandidateArgs,
    },
    /// Full booking check: working hours, then conflicts
    Check {
        #[command(flatten)]
        day: DayArgs,
        #[command(flatten)]
        candidate: CandidateArgs,
        /// Appointment being rescheduled, ignored when looking for conflicts
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Print the free stretches of the working day
    Free {
        #[command(flatten)]
        day: DayArgs,
        /// Minimum length in minutes
        #[arg(long, default_value_t = 0)]
        min: u32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            day,
            available_only,
            json,
        } => {
            let (service, provider_id) = load_service(&day)?;
            let window = service.schedule(&provider_id)?.window_for(day.date);
            let mut slots = service
                .availability(&provider_id, day.date)
                .context("Failed to generate slots")?;
            if available_only {
                slots.retain(|s| s.available);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if !window.is_working_day {
                println!("{} does not work on {}", provider_id, day.date);
            } else {
                for slot in &slots {
                    println!("{}", describe_slot(slot));
                }
            }
        }
        Commands::Validate { day, candidate } => {
            let schedule = load_schedule(&day.schedule)?;
            let interval = candidate_interval(&candidate);
            match slot_engine::validate(&interval, &schedule.window_for(day.date)) {
                Ok(()) => println!("ok: {}-{} is within working hours", interval.start, interval.end),
                Err(err) => reject(&err.to_string()),
            }
        }
        Commands::Check {
            day,
            candidate,
            exclude,
        } => {
            let (service, provider_id) = load_service(&day)?;
            let interval = candidate_interval(&candidate);
            match service.check(&provider_id, day.date, &interval, exclude.as_deref()) {
                Ok(()) => println!("ok: {}-{} is available", interval.start, interval.end),
                Err(SchedulingError::Rejected(rejection)) => reject(&rejection.to_string()),
                Err(err) => return Err(err).context("Failed to check booking"),
            }
        }
        Commands::Free { day, min, json } => {
            let (service, provider_id) = load_service(&day)?;
            let periods: Vec<_> = service
                .free_periods(&provider_id, day.date)
                .context("Failed to compute free periods")?
                .into_iter()
                .filter(|p| p.duration_minutes >= min)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&periods)?);
            } else {
                for period in &periods {
                    println!(
                        "{}-{}  {} min",
                        period.interval.start, period.interval.end, period.duration_minutes
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SLOTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn reject(reason: &str) -> ! {
    println!("rejected: {}", reason);
    process::exit(EXIT_REJECTED);
}

fn candidate_interval(candidate: &CandidateArgs) -> Interval {
    Interval {
        start: candidate.start,
        end: candidate.end,
    }
}

fn describe_slot(slot: &Slot) -> String {
    let span = format!("{}-{}", slot.interval.start, slot.interval.end);
    match (slot.available, &slot.appointment_id, &slot.blocked_reason) {
        (true, _, _) => format!("{}  available", span),
        (false, Some(id), _) => format!("{}  booked ({})", span, id),
        (false, None, Some(reason)) => format!("{}  blocked ({})", span, reason),
        (false, None, None) => format!("{}  booked", span),
    }
}

fn load_schedule(path: &str) -> Result<ProviderSchedule> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file: {}", path))?;
    let schedule = ProviderSchedule::from_json(&json)
        .with_context(|| format!("Invalid schedule file: {}", path))?;
    debug!(provider = %schedule.provider_id, windows = schedule.windows.len(), "loaded schedule");
    Ok(schedule)
}

fn load_appointments(path: Option<&str>) -> Result<Vec<Appointment>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read appointments file: {}", path))?;
    let appointments: Vec<Appointment> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid appointments file: {}", path))?;
    if let Some(bad) = appointments.iter().find(|a| !a.interval().is_well_formed()) {
        bail!(
            "Invalid appointments file: {}: appointment {} starts at {} but ends at {}",
            path,
            bad.id,
            bad.start,
            bad.end
        );
    }
    debug!(count = appointments.len(), "loaded appointments");
    Ok(appointments)
}

/// Build a booking service over one provider, seeded with the appointments file.
fn load_service(
    day: &DayArgs,
) -> Result<(BookingService<InMemoryAppointmentRepository>, String)> {
    let schedule = load_schedule(&day.schedule)?;
    let appointments = load_appointments(day.appointments.as_deref())?;

    let provider_id = schedule.provider_id.clone();
    let mut service =
        BookingService::new(InMemoryAppointmentRepository::with_appointments(appointments));
    service.add_schedule(schedule)?;
    Ok((service, provider_id))
}
