//! Wall-clock time of day with minute granularity.
//!
//! Times are stored as minutes since midnight so that ordering and overlap
//! arithmetic are exact integer comparisons. `"9:00"` and `"09:00"` parse to
//! the same value; formatting always produces the zero-padded form.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day in `[00:00, 23:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay((MINUTES_PER_DAY - 1) as u16);

    /// Build from an hour in `0..=23` and a minute in `0..=59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::OutOfRange { hour, minute });
        }
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    /// Build from minutes since midnight; `None` at or past 24:00.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(TimeOfDay(minutes as u16))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Parse `H:MM` or `HH:MM`.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let invalid = || TimeParseError::Format(s.to_string());

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(value: TimeOfDay) -> Self {
        NaiveTime::MIN + Duration::minutes(i64::from(value.minutes()))
    }
}

impl TryFrom<NaiveTime> for TimeOfDay {
    type Error = TimeParseError;

    /// Rejects times that carry seconds; slots never start mid-minute.
    fn try_from(value: NaiveTime) -> Result<Self, Self::Error> {
        if value.second() != 0 || value.nanosecond() != 0 {
            return Err(TimeParseError::SubMinute(value.to_string()));
        }
        TimeOfDay::from_hm(value.hour(), value.minute())
    }
}
