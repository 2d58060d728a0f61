//! Booking service: the path from "this slot looks free" to a stored
//! appointment.
//!
//! Every write runs the same checks in the same order (interval order,
//! working day, working hours, conflicts) against a fresh read of the day's
//! appointments, then hands the result to the repository, which settles any
//! race between two callers that both saw the slot as free.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigurationError, Result, SchedulingError};
use crate::freebusy::FreePeriod;
use crate::interval::Interval;
use crate::model::{Appointment, AppointmentStatus, AppointmentType, Priority, Slot};
use crate::repository::AppointmentRepository;
use crate::schedule::ProviderSchedule;

/// A request to book a new appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Caller-chosen id; the repository assigns one when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub provider_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub interval: Interval,
    #[serde(default)]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Books, reschedules and cancels appointments for a set of providers.
pub struct BookingService<R: AppointmentRepository> {
    schedules: HashMap<String, ProviderSchedule>,
    repository: R,
}

impl<R: AppointmentRepository> BookingService<R> {
    pub fn new(repository: R) -> Self {
        BookingService {
            schedules: HashMap::new(),
            repository,
        }
    }

    /// Register (or replace) a provider's schedule after checking it.
    pub fn add_schedule(
        &mut self,
        schedule: ProviderSchedule,
    ) -> std::result::Result<(), ConfigurationError> {
        schedule.check()?;
        self.schedules.insert(schedule.provider_id.clone(), schedule);
        Ok(())
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn schedule(&self, provider_id: &str) -> Result<&ProviderSchedule> {
        self.schedules
            .get(provider_id)
            .ok_or_else(|| SchedulingError::UnknownProvider(provider_id.to_string()))
    }

    /// The slot grid for a provider on a date.
    pub fn availability(&self, provider_id: &str, date: NaiveDate) -> Result<Vec<Slot>> {
        let schedule = self.schedule(provider_id)?;
        let appointments = self.repository.list_for_provider_on(provider_id, date)?;
        let slots = schedule.slots_on(date, &appointments)?;

        debug!(
            provider = provider_id,
            %date,
            total = slots.len(),
            open = slots.iter().filter(|s| s.available).count(),
            "computed availability"
        );
        Ok(slots)
    }

    pub fn free_periods(&self, provider_id: &str, date: NaiveDate) -> Result<Vec<FreePeriod>> {
        let schedule = self.schedule(provider_id)?;
        let appointments = self.repository.list_for_provider_on(provider_id, date)?;
        Ok(schedule.free_periods_on(date, &appointments)?)
    }

    /// Run the full booking check without writing anything.
    ///
    /// `exclude_id` names an appointment being moved, so its current slot
    /// does not count against it.
    pub fn check(
        &self,
        provider_id: &str,
        date: NaiveDate,
        interval: &Interval,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let schedule = self.schedule(provider_id)?;
        let existing = self.repository.list_for_provider_on(provider_id, date)?;

        schedule
            .validate_booking_on(date, interval, &existing, exclude_id)
            .map_err(|rejection| {
                warn!(
                    provider = provider_id,
                    %date,
                    start = %interval.start,
                    end = %interval.end,
                    reason = %rejection,
                    "booking rejected"
                );
                rejection.into()
            })
    }

    /// Validate and store a new appointment. Leave `id` as `None` to have the
    /// repository assign one; a blank id is refused.
    pub fn book(&self, request: BookingRequest) -> Result<Appointment> {
        if matches!(request.id.as_deref(), Some(id) if id.trim().is_empty()) {
            return Err(SchedulingError::BlankId);
        }
        self.check(&request.provider_id, request.date, &request.interval, None)?;

        let appointment = self.repository.create(Appointment {
            id: request.id.unwrap_or_default(),
            provider_id: request.provider_id,
            patient_id: request.patient_id,
            date: request.date,
            start: request.interval.start,
            end: request.interval.end,
            status: AppointmentStatus::Scheduled,
            appointment_type: request.appointment_type,
            priority: request.priority,
            notes: request.notes,
        })?;

        info!(
            id = %appointment.id,
            provider = %appointment.provider_id,
            date = %appointment.date,
            start = %appointment.start,
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Move an appointment to a new date and time. The appointment's current
    /// slot does not count against itself.
    pub fn reschedule(
        &self,
        appointment_id: &str,
        date: NaiveDate,
        interval: Interval,
    ) -> Result<Appointment> {
        let mut appointment = self.repository.get(appointment_id)?;
        if appointment.status == AppointmentStatus::Cancelled {
            return Err(SchedulingError::Cancelled(appointment.id));
        }

        self.check(&appointment.provider_id, date, &interval, Some(appointment_id))?;

        appointment.date = date;
        appointment.start = interval.start;
        appointment.end = interval.end;
        if appointment.status == AppointmentStatus::NoShow {
            appointment.status = AppointmentStatus::Scheduled;
        }

        let updated = self.repository.update(appointment)?;
        info!(
            id = %updated.id,
            date = %updated.date,
            start = %updated.start,
            "appointment rescheduled"
        );
        Ok(updated)
    }

    /// Cancel an appointment, returning its slot to the pool.
    pub fn cancel(&self, appointment_id: &str) -> Result<Appointment> {
        let mut appointment = self.repository.get(appointment_id)?;
        appointment.status = AppointmentStatus::Cancelled;
        let updated = self.repository.update(appointment)?;
        info!(id = appointment_id, "appointment cancelled");
        Ok(updated)
    }
}
