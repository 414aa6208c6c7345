//! Error types for slot-engine operations.

use chrono::Weekday;
use thiserror::Error;

use crate::appointment::AppointmentId;

/// Broad category of a [`BookingError`].
///
/// Callers map these onto their own transport codes (e.g. 409, 400, 404).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request clashes with existing state (another booking, the clock).
    Conflict,
    /// The request breaks a business rule or is malformed.
    Validation,
    /// Something the request refers to does not exist.
    NotFound,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Only one appointment per day")]
    OnePerDay,

    #[error("An overlapping appointment has already been made")]
    Overlapping,

    #[error("Closed on {0}")]
    Closed(Weekday),

    #[error("Appointments cannot be made more than {months} month(s) in advance")]
    HorizonExceeded { months: u32 },

    #[error("Requested slot is not in the future")]
    SlotInPast,

    #[error("Requested slot is outside business hours")]
    OutsideBusinessHours,

    #[error("You can only cancel your own appointments")]
    NotOwner,

    #[error("Past appointment can't be canceled")]
    PastAppointment,

    #[error("Appointments can't be canceled less than {hours} hour(s) before start")]
    TooCloseToCancel { hours: i64 },

    #[error("Invalid business rules: {0}")]
    InvalidRules(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),

    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("Appointment lookup failed: {0}")]
    Source(String),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::OnePerDay
            | BookingError::Overlapping
            | BookingError::PastAppointment
            | BookingError::TooCloseToCancel { .. } => ErrorKind::Conflict,
            BookingError::Closed(_)
            | BookingError::HorizonExceeded { .. }
            | BookingError::SlotInPast
            | BookingError::OutsideBusinessHours
            | BookingError::NotOwner
            | BookingError::InvalidRules(_) => ErrorKind::Validation,
            BookingError::AppointmentNotFound(_)
            | BookingError::UnknownServiceType(_)
            | BookingError::Source(_) => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
