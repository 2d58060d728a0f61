//! Detect overlaps between a candidate interval and a day's bookings.
//!
//! Intervals are half-open. A slot that ends exactly when a booking begins is
//! NOT a conflict, so back-to-back appointments are legal. A booking whose
//! start is not before its end occupies nothing and never conflicts.

use crate::interval::Interval;
use crate::model::Booking;

/// A booking that clashes with the candidate interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub booking: Booking,
    pub overlap_minutes: u32,
}

/// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
pub fn overlaps(candidate: &Interval, existing: &Interval) -> bool {
    candidate.start < existing.end && existing.start < candidate.end
}

/// True when `candidate` overlaps none of `bookings`, blocked or booked.
pub fn is_available(candidate: &Interval, bookings: &[Booking]) -> bool {
    is_available_excluding(candidate, bookings, None)
}

/// Like [`is_available`], but ignores the booking whose appointment id is
/// `exclude_id` so a rescheduled appointment never conflicts with itself.
pub fn is_available_excluding(
    candidate: &Interval,
    bookings: &[Booking],
    exclude_id: Option<&str>,
) -> bool {
    considered(bookings, exclude_id).all(|b| !overlaps(candidate, &b.interval))
}

/// Find every booking that overlaps `candidate`, in input order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(
    candidate: &Interval,
    bookings: &[Booking],
    exclude_id: Option<&str>,
) -> Vec<Conflict> {
    considered(bookings, exclude_id)
        .filter(|b| overlaps(candidate, &b.interval))
        .map(|b| Conflict {
            booking: b.clone(),
            overlap_minutes: candidate.overlap_minutes(&b.interval),
        })
        .collect()
}

/// The bookings that can occupy time: well-formed, and not the excluded one.
pub(crate) fn considered<'a>(
    bookings: &'a [Booking],
    exclude_id: Option<&'a str>,
) -> impl Iterator<Item = &'a Booking> + 'a {
    bookings
        .iter()
        .filter(|b| b.interval.is_well_formed())
        .filter(move |b| match (exclude_id, b.appointment_id.as_deref()) {
            (Some(excluded), Some(id)) => excluded != id,
            _ => true,
        })
}
