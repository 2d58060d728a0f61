//! Per-provider weekly configuration and the glue from stored appointments to
//! the day-scoped bookings the engine works on.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BookingRejection, ConfigurationError};
use crate::freebusy::{self, FreePeriod};
use crate::generator;
use crate::interval::Interval;
use crate::model::{Appointment, Booking, Slot, WorkingWindow};
use crate::validator;

/// Provider-initiated unavailability on a specific date (leave, meetings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedPeriod {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub interval: Interval,
    pub reason: String,
}

/// A provider's working windows keyed by weekday, plus one-off blocks.
///
/// A weekday missing from `windows` is a day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSchedule {
    pub provider_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub windows: HashMap<Weekday, WorkingWindow>,
    #[serde(default)]
    pub blocked_periods: Vec<BlockedPeriod>,
}

impl ProviderSchedule {
    pub fn new(provider_id: impl Into<String>) -> Self {
        ProviderSchedule {
            provider_id: provider_id.into(),
            display_name: None,
            windows: HashMap::new(),
            blocked_periods: Vec::new(),
        }
    }

    pub fn with_window(mut self, weekday: Weekday, window: WorkingWindow) -> Self {
        self.windows.insert(weekday, window);
        self
    }

    pub fn with_blocked_period(mut self, period: BlockedPeriod) -> Self {
        self.blocked_periods.push(period);
        self
    }

    /// Parse and check a schedule from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let schedule: ProviderSchedule = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::Schedule(e.to_string()))?;
        schedule.check()?;
        Ok(schedule)
    }

    /// Check every working window and blocked period.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        for (weekday, window) in &self.windows {
            if window.is_working_day {
                window.check().map_err(|e| {
                    ConfigurationError::Schedule(format!("{} window: {}", weekday, e))
                })?;
            }
        }
        for period in &self.blocked_periods {
            if !period.interval.is_well_formed() {
                return Err(ConfigurationError::Schedule(format!(
                    "blocked period on {} ({}) has start {} not before end {}",
                    period.date, period.reason, period.interval.start, period.interval.end
                )));
            }
        }
        Ok(())
    }

    /// The window for `date`'s weekday, or a day off.
    pub fn window_for(&self, date: NaiveDate) -> WorkingWindow {
        self.windows
            .get(&date.weekday())
            .cloned()
            .unwrap_or_else(WorkingWindow::day_off)
    }

    /// The day's bookings: blocked periods on `date`, plus this provider's
    /// appointments on `date` that still hold their slot.
    pub fn bookings_on(&self, date: NaiveDate, appointments: &[Appointment]) -> Vec<Booking> {
        let blocked = self
            .blocked_periods
            .iter()
            .filter(|p| p.date == date)
            .map(|p| Booking::blocked(p.interval, p.reason.clone()));

        let booked = appointments
            .iter()
            .filter(|a| a.provider_id == self.provider_id && a.date == date && a.occupies_slot())
            .map(Appointment::to_booking);

        blocked.chain(booked).collect()
    }

    pub fn slots_on(
        &self,
        date: NaiveDate,
        appointments: &[Appointment],
    ) -> Result<Vec<Slot>, ConfigurationError> {
        generator::generate_slots(&self.window_for(date), &self.bookings_on(date, appointments))
    }

    pub fn free_periods_on(
        &self,
        date: NaiveDate,
        appointments: &[Appointment],
    ) -> Result<Vec<FreePeriod>, ConfigurationError> {
        freebusy::find_free_periods(&self.window_for(date), &self.bookings_on(date, appointments))
    }

    /// Run the full booking check for `candidate` on `date`.
    pub fn validate_booking_on(
        &self,
        date: NaiveDate,
        candidate: &Interval,
        appointments: &[Appointment],
        exclude_id: Option<&str>,
    ) -> Result<(), BookingRejection> {
        validator::validate_booking(
            candidate,
            &self.window_for(date),
            &self.bookings_on(date, appointments),
            exclude_id,
        )
    }
}

/// Earliest open slot on `date` across several providers.
///
/// Ties on start time go to the provider listed first. Providers whose
/// window is malformed fail the whole query rather than being skipped.
pub fn earliest_available(
    schedules: &[ProviderSchedule],
    date: NaiveDate,
    appointments: &[Appointment],
) -> Result<Option<(String, Slot)>, ConfigurationError> {
    let mut best: Option<(String, Slot)> = None;

    for schedule in schedules {
        let first = schedule
            .slots_on(date, appointments)?
            .into_iter()
            .find(|slot| slot.available);

        if let Some(slot) = first {
            let earlier = match &best {
                Some((_, current)) => slot.interval.start < current.interval.start,
                None => true,
            };
            if earlier {
                best = Some((schedule.provider_id.clone(), slot));
            }
        }
    }

    Ok(best)
}
