//! Error types for slot-engine operations.
//!
//! Every failure here is local and deterministic: nothing is transient, so
//! nothing is retried. Callers surface the error as a rejected result.

use chrono::NaiveDate;
use thiserror::Error;

use crate::time::TimeOfDay;

/// A `HH:MM` string that could not be turned into a [`TimeOfDay`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time of day '{0}': expected HH:MM")]
    Format(String),

    #[error("Time of day out of range: {hour}:{minute:02}")]
    OutOfRange { hour: u32, minute: u32 },

    #[error("Time of day carries seconds: {0}")]
    SubMinute(String),
}

/// A malformed [`WorkingWindow`](crate::model::WorkingWindow).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Slot duration must be a positive number of minutes")]
    NonPositiveDuration,

    #[error("Unsupported slot duration: {0} minutes (expected 15, 30, 45, 60, 90 or 120)")]
    UnsupportedDuration(u16),

    #[error("Working window start {start} must precede its end {end}")]
    InvalidWindow { start: TimeOfDay, end: TimeOfDay },

    #[error("Break requires both breakStart and breakEnd")]
    IncompleteBreak,

    #[error("Break start {start} must precede break end {end}")]
    InvalidBreak { start: TimeOfDay, end: TimeOfDay },

    #[error("Break {start}-{end} falls outside working hours {window_start}-{window_end}")]
    BreakOutsideWindow {
        start: TimeOfDay,
        end: TimeOfDay,
        window_start: TimeOfDay,
        window_end: TimeOfDay,
    },

    #[error("Invalid provider schedule: {0}")]
    Schedule(String),
}

/// Why a proposed appointment interval does not fit the working window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Start time {start} must be before end time {end}")]
    InvalidOrder { start: TimeOfDay, end: TimeOfDay },

    #[error("Provider does not work on this day")]
    NonWorkingDay,

    #[error("Appointment {start}-{end} is outside working hours {window_start}-{window_end}")]
    OutsideWorkingHours {
        start: TimeOfDay,
        end: TimeOfDay,
        window_start: TimeOfDay,
        window_end: TimeOfDay,
    },
}

/// The single reason a booking attempt was turned down.
///
/// Checks run in a fixed order (order, working day, hours, conflict) and the
/// first failing one wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Requested time {start}-{end} conflicts with {with}")]
    Conflict {
        start: TimeOfDay,
        end: TimeOfDay,
        with: String,
    },
}

/// Failures of an [`AppointmentRepository`](crate::repository::AppointmentRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Appointment already exists: {0}")]
    Duplicate(String),

    #[error("Slot {start}-{end} on {date} is already taken for provider {provider_id} by {existing}")]
    SlotTaken {
        provider_id: String,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
        existing: String,
    },

    #[error("Appointment store is unavailable: {0}")]
    Unavailable(String),
}

/// Umbrella error for the booking service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Rejected(#[from] BookingRejection),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Appointment {0} is cancelled and cannot be rescheduled")]
    Cancelled(String),

    #[error("Appointment id must not be blank")]
    BlankId,
}

impl From<ValidationError> for SchedulingError {
    fn from(err: ValidationError) -> Self {
        SchedulingError::Rejected(BookingRejection::Invalid(err))
    }
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
