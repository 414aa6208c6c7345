//! Business hours, closed days, booking horizon and cancellation notice.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::interval::TimeInterval;
use crate::service::ServiceType;

/// Shop-wide rules the engine enforces. Defaults describe the shop as it
/// trades today: 09:00–19:00 on a 30-minute grid, closed on Sundays, bookable
/// one month ahead, cancellable by customers up to two hours before start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRules {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub slot_step_minutes: u32,
    pub closed_days: Vec<Weekday>,
    pub horizon_months: u32,
    pub cancel_notice_hours: i64,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            opening: hm(9, 0),
            closing: hm(19, 0),
            slot_step_minutes: 30,
            closed_days: vec![Weekday::Sun],
            horizon_months: 1,
            cancel_notice_hours: 2,
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn from_minute_of_day(minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0)
}

impl BusinessRules {
    /// Check the rules are internally consistent.
    ///
    /// The step must divide both the opening hours and the half-hour combo
    /// split, and the day must fit at least one combo appointment.
    pub fn validate(&self) -> Result<()> {
        let open = minute_of_day(self.opening);
        let close = minute_of_day(self.closing);
        let step = self.slot_step_minutes;
        let half = ServiceType::Hair.duration_minutes() as u32;
        let combo = ServiceType::HairAndBeard.duration_minutes() as u32;

        if open >= close {
            return Err(BookingError::InvalidRules(format!(
                "opening {} must be before closing {}",
                self.opening, self.closing
            )));
        }
        if close - open < combo {
            return Err(BookingError::InvalidRules(format!(
                "opening hours must fit a {}-minute appointment",
                combo
            )));
        }
        if step == 0 || half % step != 0 || (close - open) % step != 0 {
            return Err(BookingError::InvalidRules(format!(
                "slot step of {} minutes must divide {} and the opening hours",
                step, half
            )));
        }
        if self.cancel_notice_hours < 0 {
            return Err(BookingError::InvalidRules(
                "cancellation notice cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.closed_days.contains(&date.weekday())
    }

    /// Last date that may be booked when today is `today` (inclusive).
    /// Month arithmetic clamps to the end of shorter months.
    pub fn horizon_end(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.horizon_months))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn cancel_notice(&self) -> Duration {
        Duration::hours(self.cancel_notice_hours)
    }

    /// Latest start that still lets `service` finish by closing.
    pub fn last_start(&self, service: ServiceType) -> NaiveTime {
        let close = minute_of_day(self.closing);
        let minute = close.saturating_sub(service.duration_minutes() as u32);
        from_minute_of_day(minute).unwrap_or(self.opening)
    }

    /// Start times from opening to `last` inclusive, one step apart.
    pub fn grid_until(&self, last: NaiveTime) -> Vec<NaiveTime> {
        let open = minute_of_day(self.opening);
        let last = minute_of_day(last);
        let step = self.slot_step_minutes.max(1) as usize;
        (open..=last)
            .step_by(step)
            .filter_map(from_minute_of_day)
            .collect()
    }

    pub fn is_on_grid(&self, time: NaiveTime) -> bool {
        let open = minute_of_day(self.opening);
        let minute = minute_of_day(time);
        time.second() == 0
            && time.nanosecond() == 0
            && minute >= open
            && (minute - open) % self.slot_step_minutes.max(1) == 0
    }

    /// Whether `interval` lies entirely inside opening hours on its own day.
    pub fn within_hours(&self, interval: &TimeInterval) -> bool {
        let day = interval.start.date();
        interval.start >= day.and_time(self.opening) && interval.end <= day.and_time(self.closing)
    }
}
