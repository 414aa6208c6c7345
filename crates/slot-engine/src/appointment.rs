//! Appointment, booking request and slot query types.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;
use crate::service::ServiceType;

pub type AppointmentId = u64;

/// Opaque identity of the customer who owns or requests a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of a booking already held by the collaborator.
///
/// An appointment carries exactly one service; its duration (and hence the
/// interval it blocks) is derived from that service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingAppointment {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub service: ServiceType,
    pub owner: UserId,
}

impl ExistingAppointment {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.date, self.time, self.service)
    }
}

/// A candidate booking to validate before the caller persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub service: ServiceType,
    pub requester: UserId,
}

impl BookingRequest {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.date, self.time, self.service)
    }
}

/// Input to slot generation: which day, which service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: NaiveDate,
    pub service: ServiceType,
}
