//! Collaborator traits consumed by the engine, plus an in-memory snapshot.
//!
//! The engine never reaches for storage or the system clock directly. Every
//! lookup goes through an [`AppointmentSource`], every "now" through a
//! [`Clock`]. Implementations must hand back a consistent point-in-time view
//! for the duration of one engine call; serialising read-check-write per date
//! is the persistence layer's job.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::appointment::{AppointmentId, ExistingAppointment, UserId};
use crate::error::{BookingError, Result};

/// Read access to the appointments already booked.
pub trait AppointmentSource {
    /// All appointments on `date`, in any order.
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<ExistingAppointment>>;

    /// Appointments owned by `user` on `date`.
    fn appointments_for_user_on(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<ExistingAppointment>>;
}

impl<T: AppointmentSource + ?Sized> AppointmentSource for &T {
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<ExistingAppointment>> {
        (**self).appointments_on(date)
    }

    fn appointments_for_user_on(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<ExistingAppointment>> {
        (**self).appointments_for_user_on(user, date)
    }
}

/// Source of the shop-local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Real time, expressed in the shop's timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from an IANA name such as `"Europe/Zagreb"`.
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| BookingError::InvalidRules(format!("unknown timezone '{}'", name)))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// A snapshot of appointments held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryAppointments {
    appointments: Vec<ExistingAppointment>,
}

impl InMemoryAppointments {
    pub fn new(appointments: Vec<ExistingAppointment>) -> Self {
        Self { appointments }
    }

    /// Parse a JSON array of appointments.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BookingError::Source(format!("invalid appointments JSON: {}", e)))
    }

    pub fn all(&self) -> &[ExistingAppointment] {
        &self.appointments
    }

    pub fn find(&self, id: AppointmentId) -> Result<&ExistingAppointment> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .ok_or(BookingError::AppointmentNotFound(id))
    }

    pub fn insert(&mut self, appointment: ExistingAppointment) {
        self.appointments.push(appointment);
    }

    pub fn remove(&mut self, id: AppointmentId) -> Result<ExistingAppointment> {
        let index = self
            .appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or(BookingError::AppointmentNotFound(id))?;
        Ok(self.appointments.remove(index))
    }

    /// One past the largest id in the snapshot.
    pub fn next_id(&self) -> AppointmentId {
        self.appointments.iter().map(|a| a.id).max().map_or(1, |id| id + 1)
    }
}

impl AppointmentSource for InMemoryAppointments {
    fn appointments_on(&self, date: NaiveDate) -> Result<Vec<ExistingAppointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }

    fn appointments_for_user_on(
        &self,
        user: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<ExistingAppointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.date == date && &a.owner == user)
            .cloned()
            .collect())
    }
}
