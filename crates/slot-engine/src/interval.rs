//! Half-open time intervals and the overlap test.
//!
//! Intervals are anchored to a calendar date so that arithmetic near midnight
//! never wraps. Adjacent intervals (one ends exactly when the other starts)
//! do NOT overlap: back-to-back bookings are legal.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::service::ServiceType;

/// The `[start, end)` span a booking occupies. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Interval of `service` starting at `time` on `date`; `end = start + duration`.
    pub fn new(date: NaiveDate, time: NaiveTime, service: ServiceType) -> Self {
        let start = date.and_time(time);
        Self {
            start,
            end: start + service.duration(),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Minutes shared with `other`, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeInterval) -> i64 {
        if !overlaps(self, other) {
            return 0;
        }
        (self.end.min(other.end) - self.start.max(other.start)).num_minutes()
    }
}

/// Two intervals overlap iff `candidate.start < existing.end && candidate.end > existing.start`.
pub fn overlaps(existing: &TimeInterval, candidate: &TimeInterval) -> bool {
    candidate.start < existing.end && candidate.end > existing.start
}
