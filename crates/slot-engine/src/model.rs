//! Value objects shared by the generator, the conflict detector and the
//! validator, plus the appointment record the booking layer stores.
//!
//! Wire names are camelCase to match the payloads the front office already
//! exchanges (`isWorkingDay`, `breakStart`, `slotDuration`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::interval::Interval;
use crate::time::TimeOfDay;

/// Reason attached to the synthetic booking that covers a window's break.
pub const BREAK_REASON: &str = "Break";

/// The slot lengths offered when configuring a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum SlotDuration {
    Min15,
    Min30,
    Min45,
    Min60,
    Min90,
    Min120,
}

impl SlotDuration {
    pub const ALL: [SlotDuration; 6] = [
        SlotDuration::Min15,
        SlotDuration::Min30,
        SlotDuration::Min45,
        SlotDuration::Min60,
        SlotDuration::Min90,
        SlotDuration::Min120,
    ];

    pub fn minutes(self) -> u16 {
        match self {
            SlotDuration::Min15 => 15,
            SlotDuration::Min30 => 30,
            SlotDuration::Min45 => 45,
            SlotDuration::Min60 => 60,
            SlotDuration::Min90 => 90,
            SlotDuration::Min120 => 120,
        }
    }
}

impl TryFrom<u16> for SlotDuration {
    type Error = ConfigurationError;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        SlotDuration::ALL
            .into_iter()
            .find(|d| d.minutes() == minutes)
            .ok_or(ConfigurationError::UnsupportedDuration(minutes))
    }
}

impl From<SlotDuration> for u16 {
    fn from(value: SlotDuration) -> Self {
        value.minutes()
    }
}

/// Whether an occupied interval belongs to a patient or to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Taken by a patient appointment.
    #[default]
    Booked,
    /// Provider-initiated unavailability (lunch, leave, meetings).
    Blocked,
}

/// An occupied interval on the day being scheduled.
///
/// Bookings are day-scoped: whoever fetches them for a provider and date
/// passes only that day's list to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(flatten)]
    pub interval: Interval,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Booking {
    pub fn booked(appointment_id: impl Into<String>, interval: Interval) -> Self {
        Booking {
            appointment_id: Some(appointment_id.into()),
            interval,
            status: BookingStatus::Booked,
            reason: None,
        }
    }

    pub fn blocked(interval: Interval, reason: impl Into<String>) -> Self {
        Booking {
            appointment_id: None,
            interval,
            status: BookingStatus::Blocked,
            reason: Some(reason.into()),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == BookingStatus::Blocked
    }

    /// Short human description, used in conflict messages.
    pub fn describe(&self) -> String {
        match (&self.status, &self.appointment_id, &self.reason) {
            (BookingStatus::Booked, Some(id), _) => format!("appointment {}", id),
            (BookingStatus::Booked, None, _) => format!("a booking at {}", self.interval.start),
            (BookingStatus::Blocked, _, Some(reason)) => format!("blocked time ({})", reason),
            (BookingStatus::Blocked, _, None) => "blocked time".to_string(),
        }
    }
}

/// A candidate slot with its derived availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(flatten)]
    pub interval: Interval,
    pub available: bool,
    /// The patient appointment occupying this slot, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    /// Why the provider blocked this slot, if they did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

/// A provider's working hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWindow {
    pub is_working_day: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<TimeOfDay>,
    /// Slot length in minutes. Usually one of [`SlotDuration::ALL`].
    pub slot_duration: u16,
}

impl WorkingWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay, slot_duration: SlotDuration) -> Self {
        WorkingWindow {
            is_working_day: true,
            start,
            end,
            break_start: None,
            break_end: None,
            slot_duration: slot_duration.minutes(),
        }
    }

    /// A window that yields no slots.
    pub fn day_off() -> Self {
        WorkingWindow {
            is_working_day: false,
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::LAST_MINUTE,
            break_start: None,
            break_end: None,
            slot_duration: SlotDuration::Min30.minutes(),
        }
    }

    pub fn with_break(mut self, interval: Interval) -> Self {
        self.break_start = Some(interval.start);
        self.break_end = Some(interval.end);
        self
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// The break, when both of its ends are configured.
    pub fn break_interval(&self) -> Option<Interval> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some(Interval { start, end }),
            _ => None,
        }
    }

    /// The configured duration if it is one of the offered lengths.
    pub fn standard_duration(&self) -> Option<SlotDuration> {
        SlotDuration::try_from(self.slot_duration).ok()
    }

    /// Reject windows the generator cannot work with.
    ///
    /// Checks the window itself, not `is_working_day`; a day off with odd
    /// hours is still a day off.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        if self.slot_duration == 0 {
            return Err(ConfigurationError::NonPositiveDuration);
        }
        if self.start >= self.end {
            return Err(ConfigurationError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }

        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if start >= end {
                    return Err(ConfigurationError::InvalidBreak { start, end });
                }
                if start < self.start || end > self.end {
                    return Err(ConfigurationError::BreakOutsideWindow {
                        start,
                        end,
                        window_start: self.start,
                        window_end: self.end,
                    });
                }
                Ok(())
            }
            _ => Err(ConfigurationError::IncompleteBreak),
        }
    }
}

/// Lifecycle state of an appointment. Carried through, never interpreted by
/// the slot arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    CheckedIn,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Cancelled and no-show appointments give their slot back.
    pub fn occupies_slot(self) -> bool {
        match self {
            AppointmentStatus::Scheduled
            | AppointmentStatus::Confirmed
            | AppointmentStatus::CheckedIn
            | AppointmentStatus::InProgress
            | AppointmentStatus::Completed => true,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    Emergency,
    Procedure,
    Telemedicine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Routine,
    Urgent,
    Emergency,
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub provider_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// Holds its slot: an active status and a start before its end.
    pub fn occupies_slot(&self) -> bool {
        self.status.occupies_slot() && self.interval().is_well_formed()
    }

    pub fn to_booking(&self) -> Booking {
        Booking::booked(self.id.clone(), self.interval())
    }
}
