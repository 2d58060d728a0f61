//! Split a working window into fixed-size slots and mark each one free or
//! taken.
//!
//! Generation is a pure function of the window and the bookings passed in:
//! nothing is cached, and calling it twice with the same inputs yields the
//! same slots.

use crate::conflict::{considered, overlaps};
use crate::error::ConfigurationError;
use crate::interval::Interval;
use crate::model::{Booking, BookingStatus, Slot, WorkingWindow, BREAK_REASON};
use crate::time::TimeOfDay;

/// Generate the slot grid for one provider-day.
///
/// Starting at `window.start`, emits `[cursor, cursor + slot_duration)` and
/// advances by `slot_duration` for as long as the whole slot fits before
/// `window.end`. A trailing remainder shorter than one slot is dropped, never
/// truncated. The break, if configured, is treated as a blocked booking with
/// reason `"Break"`. Bookings whose start is not before their end occupy
/// nothing.
///
/// Returns an empty list on non-working days regardless of the other fields.
///
/// # Errors
/// Returns a [`ConfigurationError`] for a working day whose window is
/// malformed (zero duration, `start >= end`, bad break).
pub fn generate_slots(
    window: &WorkingWindow,
    bookings: &[Booking],
) -> Result<Vec<Slot>, ConfigurationError> {
    if !window.is_working_day {
        return Ok(Vec::new());
    }
    window.check()?;

    let break_booking = window
        .break_interval()
        .map(|interval| Booking::blocked(interval, BREAK_REASON));
    let occupied: Vec<&Booking> = considered(bookings, None)
        .chain(break_booking.as_ref())
        .collect();

    let step = u32::from(window.slot_duration);
    let window_end = window.end.minutes();
    let mut cursor = window.start.minutes();
    let mut slots = Vec::with_capacity(((window_end - cursor) / step) as usize);

    while cursor + step <= window_end {
        let (Some(start), Some(end)) = (
            TimeOfDay::from_minutes(cursor),
            TimeOfDay::from_minutes(cursor + step),
        ) else {
            break;
        };
        slots.push(mark_slot(Interval { start, end }, &occupied));
        cursor += step;
    }

    Ok(slots)
}

/// Only the slots a patient could book.
pub fn available_slots(
    window: &WorkingWindow,
    bookings: &[Booking],
) -> Result<Vec<Slot>, ConfigurationError> {
    Ok(generate_slots(window, bookings)?
        .into_iter()
        .filter(|slot| slot.available)
        .collect())
}

fn mark_slot(interval: Interval, occupied: &[&Booking]) -> Slot {
    let mut slot = Slot {
        interval,
        available: true,
        appointment_id: None,
        blocked_reason: None,
    };

    for booking in occupied.iter().filter(|b| overlaps(&interval, &b.interval)) {
        slot.available = false;
        match booking.status {
            BookingStatus::Booked if slot.appointment_id.is_none() => {
                slot.appointment_id = booking.appointment_id.clone();
            }
            BookingStatus::Blocked if slot.blocked_reason.is_none() => {
                slot.blocked_reason = booking.reason.clone();
            }
            _ => {}
        }
    }

    slot
}
