//! # slot-engine
//!
//! Slot availability and booking conflict rules for a single-chair barbershop.
//!
//! The engine is a set of pure, synchronous checks over a snapshot of the
//! day's appointments. It owns no storage, transport or identity: callers
//! lend it an [`AppointmentSource`] and a [`Clock`], and act on the slot
//! lists and accept/reject decisions it returns.
//!
//! ## Modules
//!
//! - [`service`] -- Service catalogue and fixed durations
//! - [`appointment`] -- Appointment, booking request and slot query types
//! - [`interval`] -- Half-open time intervals and the overlap test
//! - [`source`] -- Collaborator traits (appointment lookup, clock) and an in-memory snapshot
//! - [`rules`] -- Business hours, closed days, booking horizon, cancellation notice
//! - [`conflict`] -- Availability checks and new-booking validation
//! - [`slots`] -- Candidate grid and available slot generation
//! - [`cancel`] -- Cancellation rules for owners and admins
//! - [`schedule`] -- Day schedule, busy/free views and user history
//! - [`error`] -- Error types

pub mod appointment;
pub mod cancel;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod rules;
pub mod schedule;
pub mod service;
pub mod slots;
pub mod source;

pub use appointment::{AppointmentId, AvailableSlotsQuery, BookingRequest, ExistingAppointment, UserId};
pub use cancel::{validate_cancellation, CancelRole};
pub use conflict::{find_overlaps, is_free, ConflictEvaluator, Overlap};
pub use error::{BookingError, ErrorKind};
pub use interval::{overlaps, TimeInterval};
pub use rules::BusinessRules;
pub use schedule::{busy_blocks, day_schedule, free_windows, user_history, BusyBlock, FreeWindow};
pub use service::ServiceType;
pub use slots::SlotGenerator;
pub use source::{AppointmentSource, Clock, FixedClock, InMemoryAppointments, SystemClock};
