//! Half-open time intervals within a single day.

use serde::{Deserialize, Serialize};

use crate::error::{TimeParseError, ValidationError};
use crate::time::TimeOfDay;

/// The interval `[start, end)`.
///
/// Fields are public so callers can describe a proposed appointment before it
/// has been checked; an interval is well-formed only when `start < end`.
/// Use [`Interval::new`] to get one that is known to be well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// Build a well-formed interval, rejecting zero-length and reversed ones.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidOrder { start, end });
        }
        Ok(Interval { start, end })
    }

    /// Parse two `HH:MM` strings without checking their order.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeParseError> {
        Ok(Interval {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Length in minutes; zero for malformed intervals.
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared with `other`, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.minutes() - start.minutes()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
