//! Appointment persistence seam.
//!
//! The slot engine itself never holds appointment state; the booking service
//! reads and writes through [`AppointmentRepository`]. The in-memory store
//! backs tests, the CLI and demos.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;

use crate::conflict::overlaps;
use crate::error::RepositoryError;
use crate::model::Appointment;

/// Storage for appointments.
///
/// Implementations must make `create` and `update` atomic with respect to
/// the slot they occupy: two concurrent writes that overlap for the same
/// provider and date must not both succeed. The engine only answers "is it
/// free in the snapshot I was given"; this is where the race is settled.
pub trait AppointmentRepository: Send + Sync {
    /// Store a new appointment. An empty `id` asks the store to assign one.
    fn create(&self, appointment: Appointment) -> Result<Appointment, RepositoryError>;

    fn get(&self, id: &str) -> Result<Appointment, RepositoryError>;

    /// Replace the stored appointment with the same id.
    fn update(&self, appointment: Appointment) -> Result<Appointment, RepositoryError>;

    fn list_for_provider_on(
        &self,
        provider_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, RepositoryError>;
}

#[derive(Debug, Default)]
struct Store {
    appointments: Vec<Appointment>,
    next_id: u64,
}

/// Process-local appointment store guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    store: RwLock<Store>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. from a JSON fixture. Entries are taken as-is.
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        InMemoryAppointmentRepository {
            store: RwLock::new(Store {
                next_id: appointments.len() as u64,
                appointments,
            }),
        }
    }

    /// Every stored appointment, in insertion order.
    pub fn all(&self) -> Result<Vec<Appointment>, RepositoryError> {
        Ok(self.read()?.appointments.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, RepositoryError> {
        self.store
            .read()
            .map_err(|_| RepositoryError::Unavailable("appointment lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, RepositoryError> {
        self.store
            .write()
            .map_err(|_| RepositoryError::Unavailable("appointment lock poisoned".to_string()))
    }
}

/// The uniqueness constraint on provider + date + time range.
fn ensure_slot_free(store: &Store, candidate: &Appointment) -> Result<(), RepositoryError> {
    if !candidate.occupies_slot() {
        return Ok(());
    }

    let clash = store.appointments.iter().find(|existing| {
        existing.id != candidate.id
            && existing.provider_id == candidate.provider_id
            && existing.date == candidate.date
            && existing.occupies_slot()
            && overlaps(&existing.interval(), &candidate.interval())
    });

    match clash {
        Some(existing) => Err(RepositoryError::SlotTaken {
            provider_id: candidate.provider_id.clone(),
            date: candidate.date,
            start: candidate.start,
            end: candidate.end,
            existing: existing.id.clone(),
        }),
        None => Ok(()),
    }
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn create(&self, mut appointment: Appointment) -> Result<Appointment, RepositoryError> {
        let mut store = self.write()?;

        if appointment.id.is_empty() {
            loop {
                store.next_id += 1;
                let id = format!("apt-{:03}", store.next_id);
                if !store.appointments.iter().any(|a| a.id == id) {
                    appointment.id = id;
                    break;
                }
            }
        } else if store.appointments.iter().any(|a| a.id == appointment.id) {
            return Err(RepositoryError::Duplicate(appointment.id));
        }

        ensure_slot_free(&store, &appointment)?;

        debug!(id = %appointment.id, provider = %appointment.provider_id, "stored appointment");
        store.appointments.push(appointment.clone());
        Ok(appointment)
    }

    fn get(&self, id: &str) -> Result<Appointment, RepositoryError> {
        self.read()?
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn update(&self, appointment: Appointment) -> Result<Appointment, RepositoryError> {
        let mut store = self.write()?;
        if !store.appointments.iter().any(|a| a.id == appointment.id) {
            return Err(RepositoryError::NotFound(appointment.id));
        }
        ensure_slot_free(&store, &appointment)?;

        let slot = store
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment.id)
            .ok_or_else(|| RepositoryError::NotFound(appointment.id.clone()))?;
        *slot = appointment.clone();

        debug!(id = %appointment.id, status = ?appointment.status, "updated appointment");
        Ok(appointment)
    }

    fn list_for_provider_on(
        &self,
        provider_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let mut found: Vec<Appointment> = self
            .read()?
            .appointments
            .iter()
            .filter(|a| a.provider_id == provider_id && a.date == date)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.start, a.end));
        Ok(found)
    }
}
