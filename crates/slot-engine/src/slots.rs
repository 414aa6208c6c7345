//! Candidate grid and available slot generation.
//!
//! The grid runs from opening to the last start that still finishes by
//! closing, one step apart. Slots at or before "now" are trimmed, so today's
//! grid shrinks as the day goes on and past dates yield nothing.
//!
//! The combo service has no hour-long slot type of its own. A combo start is
//! offered when its first half is free as a HAIR slot and its second half is
//! free as a BEARD slot.

use chrono::{NaiveDate, NaiveTime};

use crate::appointment::AvailableSlotsQuery;
use crate::conflict::{is_free, ConflictEvaluator};
use crate::error::Result;
use crate::service::ServiceType;
use crate::source::{AppointmentSource, Clock};

/// Produces the bookable start times for a date and service.
#[derive(Debug, Clone)]
pub struct SlotGenerator<S, C> {
    evaluator: ConflictEvaluator<S, C>,
}

impl<S: AppointmentSource, C: Clock> SlotGenerator<S, C> {
    pub fn new(evaluator: ConflictEvaluator<S, C>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &ConflictEvaluator<S, C> {
        &self.evaluator
    }

    /// The candidate grid for `service` on `date`, ascending, before any
    /// availability filtering. Closed days have no candidates.
    pub fn candidate_slots(&self, date: NaiveDate, service: ServiceType) -> Vec<NaiveTime> {
        let rules = self.evaluator.rules();
        if rules.is_closed(date) {
            return Vec::new();
        }

        // HAIR_AND_BEARD ends its grid one hour before closing; the
        // closing-edge start is handled in `available_slots`.
        let last = rules.last_start(service);
        let now = self.evaluator.clock().now();

        rules
            .grid_until(last)
            .into_iter()
            .filter(|slot| date.and_time(*slot) > now)
            .collect()
    }

    /// Start times on `date` at which `service` can be booked, ascending and
    /// without duplicates.
    ///
    /// The day's appointments are read once; every candidate is judged
    /// against that snapshot.
    pub fn available_slots(&self, date: NaiveDate, service: ServiceType) -> Result<Vec<NaiveTime>> {
        let candidates = self.candidate_slots(date, service);
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let appointments = self.evaluator.source().appointments_on(date)?;

        if service != ServiceType::HairAndBeard {
            return Ok(candidates
                .into_iter()
                .filter(|slot| is_free(&appointments, date, *slot, service))
                .collect());
        }

        let half = ServiceType::Hair.duration();
        let combo_fits = |first: NaiveTime, second: NaiveTime| {
            is_free(&appointments, date, first, ServiceType::Hair)
                && is_free(&appointments, date, second, ServiceType::Beard)
        };

        // Pair every candidate with the candidate one half later.
        let mut slots: Vec<NaiveTime> = candidates
            .iter()
            .copied()
            .filter(|first| {
                let second = *first + half;
                candidates.binary_search(&second).is_ok() && combo_fits(*first, second)
            })
            .collect();

        // Starts at the closing edge have their second half past the combo
        // grid, so the pair scan never sees them (18:00 with 18:30 by default).
        let edge_from = self.evaluator.rules().last_start(ServiceType::HairAndBeard) - half;
        slots.extend(
            candidates
                .iter()
                .copied()
                .filter(|first| *first > edge_from && combo_fits(*first, *first + half)),
        );

        Ok(slots)
    }

    pub fn available(&self, query: &AvailableSlotsQuery) -> Result<Vec<NaiveTime>> {
        self.available_slots(query.date, query.service)
    }

    /// Earliest bookable `(date, time)` for `service` on or after `from`,
    /// searching no further than the booking horizon.
    pub fn next_available(
        &self,
        from: NaiveDate,
        service: ServiceType,
    ) -> Result<Option<(NaiveDate, NaiveTime)>> {
        let today = self.evaluator.clock().today();
        let horizon = self.evaluator.rules().horizon_end(today);

        let mut date = from.max(today);
        while date <= horizon {
            if let Some(slot) = self.available_slots(date, service)?.first() {
                return Ok(Some((date, *slot)));
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Ok(None)
    }
}
