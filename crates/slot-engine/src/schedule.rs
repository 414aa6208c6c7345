//! Day schedule, busy/free views and user history.
//!
//! Busy blocks are the day's appointments merged into non-overlapping runs
//! and clipped to opening hours; free windows are the gaps between them.

use std::cmp::Reverse;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::appointment::{ExistingAppointment, UserId};
use crate::error::Result;
use crate::rules::BusinessRules;
use crate::source::AppointmentSource;

/// A run of back-to-back or overlapping appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Number of appointments merged into this block.
    pub appointment_count: usize,
}

/// A gap in the day with no appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

/// All appointments on `date`, ordered by start time.
pub fn day_schedule<S: AppointmentSource + ?Sized>(
    source: &S,
    date: NaiveDate,
) -> Result<Vec<ExistingAppointment>> {
    let mut appointments = source.appointments_on(date)?;
    appointments.sort_by_key(|a| (a.time, a.id));
    Ok(appointments)
}

/// The appointments owned by `user`, newest first (date descending, then
/// time descending).
pub fn user_history<'a>(
    appointments: &'a [ExistingAppointment],
    user: &UserId,
) -> Vec<&'a ExistingAppointment> {
    let mut history: Vec<&ExistingAppointment> =
        appointments.iter().filter(|a| &a.owner == user).collect();
    history.sort_by_key(|a| Reverse(a.starts_at()));
    history
}

/// Merge the day's appointments into busy blocks inside opening hours.
///
/// Adjacent appointments merge into one block.
pub fn busy_blocks(
    appointments: &[ExistingAppointment],
    date: NaiveDate,
    rules: &BusinessRules,
) -> Vec<BusyBlock> {
    let open = date.and_time(rules.opening);
    let close = date.and_time(rules.closing);

    let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = appointments
        .iter()
        .map(|a| a.interval())
        .filter(|i| i.start < close && i.end > open)
        .map(|i| (i.start.max(open), i.end.min(close)))
        .collect();
    intervals.sort();

    let mut merged: Vec<(NaiveDateTime, NaiveDateTime, usize)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                last.2 += 1;
                continue;
            }
        }
        merged.push((start, end, 1));
    }

    merged
        .into_iter()
        .map(|(start, end, appointment_count)| BusyBlock {
            start: start.time(),
            end: end.time(),
            appointment_count,
        })
        .collect()
}

/// Gaps between busy blocks inside opening hours, in order.
pub fn free_windows(
    appointments: &[ExistingAppointment],
    date: NaiveDate,
    rules: &BusinessRules,
) -> Vec<FreeWindow> {
    let mut windows = Vec::new();
    let mut cursor = rules.opening;

    for block in busy_blocks(appointments, date, rules) {
        if cursor < block.start {
            windows.push(window(cursor, block.start));
        }
        cursor = cursor.max(block.end);
    }

    if cursor < rules.closing {
        windows.push(window(cursor, rules.closing));
    }

    windows
}

fn window(start: NaiveTime, end: NaiveTime) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: (end - start).num_minutes(),
    }
}
