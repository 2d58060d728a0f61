//! Check a proposed appointment against the provider's working window.
//!
//! Validation and conflict detection are separate so a caller can tell
//! "outside working hours" apart from "double-booked" when reporting back to
//! the user. [`validate_booking`] composes both in the fixed order
//! order, working day, hours, conflict.

use crate::conflict::find_conflicts;
use crate::error::{BookingRejection, ValidationError};
use crate::interval::Interval;
use crate::model::{Booking, WorkingWindow, BREAK_REASON};

/// Check that `candidate` is a well-formed interval inside `window`.
///
/// # Errors
/// - [`ValidationError::InvalidOrder`] when `candidate.start >= candidate.end`
/// - [`ValidationError::NonWorkingDay`] when the window is a day off
/// - [`ValidationError::OutsideWorkingHours`] when the candidate starts before
///   or ends after the window
pub fn validate(candidate: &Interval, window: &WorkingWindow) -> Result<(), ValidationError> {
    if candidate.start >= candidate.end {
        return Err(ValidationError::InvalidOrder {
            start: candidate.start,
            end: candidate.end,
        });
    }

    if !window.is_working_day {
        return Err(ValidationError::NonWorkingDay);
    }

    if candidate.start < window.start || candidate.end > window.end {
        return Err(ValidationError::OutsideWorkingHours {
            start: candidate.start,
            end: candidate.end,
            window_start: window.start,
            window_end: window.end,
        });
    }

    Ok(())
}

/// Full pre-booking check: [`validate`] first, then conflicts against
/// `bookings` and the window's break.
///
/// `exclude_id` names the appointment being rescheduled, if any.
pub fn validate_booking(
    candidate: &Interval,
    window: &WorkingWindow,
    bookings: &[Booking],
    exclude_id: Option<&str>,
) -> Result<(), BookingRejection> {
    validate(candidate, window)?;

    let mut occupied = bookings.to_vec();
    if let Some(interval) = window.break_interval() {
        occupied.push(Booking::blocked(interval, BREAK_REASON));
    }

    match find_conflicts(candidate, &occupied, exclude_id).into_iter().next() {
        Some(conflict) => Err(BookingRejection::Conflict {
            start: candidate.start,
            end: candidate.end,
            with: conflict.booking.describe(),
        }),
        None => Ok(()),
    }
}
