//! Availability checks and new-booking validation.
//!
//! The shop has a single chair, so availability is judged against every
//! appointment on the date regardless of who serves it. Adjacent bookings
//! (one ends exactly when another starts) are NOT conflicts.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::appointment::{BookingRequest, ExistingAppointment, UserId};
use crate::cancel::{self, CancelRole};
use crate::error::{BookingError, Result};
use crate::interval::{overlaps, TimeInterval};
use crate::rules::BusinessRules;
use crate::service::ServiceType;
use crate::source::{AppointmentSource, Clock};

/// An existing appointment that a candidate interval runs into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub appointment: ExistingAppointment,
    pub overlap_minutes: i64,
}

/// Every appointment in `appointments` that overlaps `candidate`, in input order.
pub fn find_overlaps(appointments: &[ExistingAppointment], candidate: &TimeInterval) -> Vec<Overlap> {
    appointments
        .iter()
        .filter_map(|appointment| {
            let existing = appointment.interval();
            overlaps(&existing, candidate).then(|| Overlap {
                appointment: appointment.clone(),
                overlap_minutes: existing.overlap_minutes(candidate),
            })
        })
        .collect()
}

/// Whether `service` starting at `start` on `date` clears every appointment
/// in the snapshot.
pub fn is_free(
    appointments: &[ExistingAppointment],
    date: NaiveDate,
    start: NaiveTime,
    service: ServiceType,
) -> bool {
    let candidate = TimeInterval::new(date, start, service);
    appointments
        .iter()
        .all(|appointment| !overlaps(&appointment.interval(), &candidate))
}

/// Decides whether proposed bookings fit the day's appointments and the
/// shop's rules.
#[derive(Debug, Clone)]
pub struct ConflictEvaluator<S, C> {
    source: S,
    clock: C,
    rules: BusinessRules,
}

impl<S: AppointmentSource, C: Clock> ConflictEvaluator<S, C> {
    /// Evaluator with the default [`BusinessRules`].
    pub fn new(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            rules: BusinessRules::default(),
        }
    }

    /// # Errors
    /// Returns `BookingError::InvalidRules` if `rules` fail [`BusinessRules::validate`].
    pub fn with_rules(source: S, clock: C, rules: BusinessRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            source,
            clock,
            rules,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Whether `service` starting at `start` on `date` overlaps no existing
    /// appointment on that date.
    pub fn is_available(&self, date: NaiveDate, start: NaiveTime, service: ServiceType) -> Result<bool> {
        let appointments = self.source.appointments_on(date)?;
        Ok(is_free(&appointments, date, start, service))
    }

    /// Appointments on the request's date that its interval runs into.
    pub fn overlaps_for(&self, request: &BookingRequest) -> Result<Vec<Overlap>> {
        let appointments = self.source.appointments_on(request.date)?;
        Ok(find_overlaps(&appointments, &request.interval()))
    }

    /// Run every booking rule against `request`, first violation wins:
    ///
    /// 1. the requester already has an appointment that day → `OnePerDay`
    /// 2. an existing appointment of a peer service overlaps → `Overlapping`
    /// 3. the shop is closed that weekday → `Closed`
    /// 4. the date lies past the booking horizon → `HorizonExceeded`
    /// 5. the start is not strictly in the future → `SlotInPast`
    /// 6. the start is off-grid or the service runs past closing → `OutsideBusinessHours`
    ///
    /// Purely evaluative: the caller persists only after `Ok(())`.
    pub fn validate_new_booking(&self, request: &BookingRequest) -> Result<()> {
        let own = self
            .source
            .appointments_for_user_on(&request.requester, request.date)?;
        if !own.is_empty() {
            return Err(BookingError::OnePerDay);
        }

        let candidate = request.interval();
        let peers = request.service.overlap_peers();
        let clash = self
            .source
            .appointments_on(request.date)?
            .iter()
            .filter(|appointment| peers.contains(&appointment.service))
            .any(|appointment| overlaps(&appointment.interval(), &candidate));
        if clash {
            return Err(BookingError::Overlapping);
        }

        if self.rules.is_closed(request.date) {
            return Err(BookingError::Closed(request.date.weekday()));
        }

        let now = self.clock.now();
        if request.date > self.rules.horizon_end(now.date()) {
            return Err(BookingError::HorizonExceeded {
                months: self.rules.horizon_months,
            });
        }

        if request.starts_at() <= now {
            return Err(BookingError::SlotInPast);
        }

        if !self.rules.is_on_grid(request.time) || !self.rules.within_hours(&candidate) {
            return Err(BookingError::OutsideBusinessHours);
        }

        Ok(())
    }

    /// Check whether `requester` acting as `role` may cancel `appointment` now.
    pub fn validate_cancellation(
        &self,
        appointment: &ExistingAppointment,
        requester: &UserId,
        role: CancelRole,
    ) -> Result<()> {
        cancel::validate_cancellation(appointment, requester, role, self.clock.now(), &self.rules)
    }
}
