//! Compute free periods inside a working window.
//!
//! Where the slot grid answers "which fixed-size slots are open", this answers
//! "which stretches of the day are open", independent of slot boundaries. The
//! bookings and the break are clipped to the window, sorted, merged, and the
//! gaps between them returned.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::interval::Interval;
use crate::model::{Booking, WorkingWindow};

/// A free stretch of the working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreePeriod {
    #[serde(flatten)]
    pub interval: Interval,
    pub duration_minutes: u32,
}

impl FreePeriod {
    fn new(interval: Interval) -> Self {
        FreePeriod {
            duration_minutes: interval.duration_minutes(),
            interval,
        }
    }
}

/// Merge overlapping or adjacent busy intervals, clipped to `window`.
///
/// Returns a sorted, non-overlapping list.
fn merge_busy_periods(bookings: &[Booking], window: &WorkingWindow) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = bookings
        .iter()
        .map(|b| b.interval)
        .chain(window.break_interval())
        .filter(|i| i.is_well_formed() && i.start < window.end && i.end > window.start)
        .map(|i| Interval {
            start: i.start.max(window.start),
            end: i.end.min(window.end),
        })
        .collect();

    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Find the free periods of a provider-day, sorted by start time.
///
/// Empty on non-working days.
pub fn find_free_periods(
    window: &WorkingWindow,
    bookings: &[Booking],
) -> Result<Vec<FreePeriod>, ConfigurationError> {
    if !window.is_working_day {
        return Ok(Vec::new());
    }
    window.check()?;

    let mut free = Vec::new();
    let mut cursor = window.start;

    for busy in merge_busy_periods(bookings, window) {
        if cursor < busy.start {
            free.push(FreePeriod::new(Interval {
                start: cursor,
                end: busy.start,
            }));
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window.end {
        free.push(FreePeriod::new(Interval {
            start: cursor,
            end: window.end,
        }));
    }

    Ok(free)
}

/// The first free period lasting at least `min_minutes`.
pub fn find_first_free_period(
    window: &WorkingWindow,
    bookings: &[Booking],
    min_minutes: u32,
) -> Result<Option<FreePeriod>, ConfigurationError> {
    Ok(find_free_periods(window, bookings)?
        .into_iter()
        .find(|period| period.duration_minutes >= min_minutes))
}
