//! # slot-engine
//!
//! Deterministic provider availability for appointment scheduling.
//!
//! Splits a provider's working hours into fixed-size slots, marks each slot
//! free or taken against the day's bookings and breaks, and validates
//! proposed appointments against working hours. The core functions are pure:
//! they hold no state between calls and may be called from any number of
//! threads at once.
//!
//! ## Modules
//!
//! - [`time`] — `TimeOfDay`, minutes since midnight with `HH:MM` parsing
//! - [`interval`] — half-open `[start, end)` intervals
//! - [`model`] — bookings, slots, working windows and appointment labels
//! - [`generator`] — working window → slot grid
//! - [`conflict`] — overlap checks against existing bookings
//! - [`validator`] — working-hours validation and the full pre-booking check
//! - [`freebusy`] — free stretches of a working day
//! - [`schedule`] — per-provider weekly windows and blocked periods
//! - [`repository`] — appointment persistence seam and an in-memory store
//! - [`booking`] — book, reschedule and cancel on top of the above
//! - [`error`] — Error types

pub mod booking;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod generator;
pub mod interval;
pub mod model;
pub mod repository;
pub mod schedule;
pub mod time;
pub mod validator;

pub use booking::{BookingRequest, BookingService};
pub use conflict::{find_conflicts, is_available, is_available_excluding, overlaps, Conflict};
pub use error::{
    BookingRejection, ConfigurationError, RepositoryError, SchedulingError, TimeParseError,
    ValidationError,
};
pub use freebusy::{find_first_free_period, find_free_periods, FreePeriod};
pub use generator::{available_slots, generate_slots};
pub use interval::Interval;
pub use model::{
    Appointment, AppointmentStatus, AppointmentType, Booking, BookingStatus, Priority, Slot,
    SlotDuration, WorkingWindow,
};
pub use repository::{AppointmentRepository, InMemoryAppointmentRepository};
pub use schedule::{earliest_available, BlockedPeriod, ProviderSchedule};
pub use time::TimeOfDay;
pub use validator::{validate, validate_booking};
