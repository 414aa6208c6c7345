//! Cancellation rules for owners and admins.
//!
//! A successful check only signals that the appointment is safe to delete;
//! deleting it is the caller's job.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::appointment::{ExistingAppointment, UserId};
use crate::error::{BookingError, Result};
use crate::rules::BusinessRules;

/// Who is asking for the cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelRole {
    /// The customer cancelling their own booking.
    #[default]
    Owner,
    /// Shop staff. Skips the ownership and short-notice checks.
    Admin,
}

/// Check whether `requester` acting as `role` may cancel `appointment` at `now`.
///
/// Checks run in order, first violation wins:
/// 1. owner-initiated and `requester` is not the owner → `NotOwner`
/// 2. the appointment started before `now` → `PastAppointment`
/// 3. owner-initiated and the start is within the notice period → `TooCloseToCancel`
pub fn validate_cancellation(
    appointment: &ExistingAppointment,
    requester: &UserId,
    role: CancelRole,
    now: NaiveDateTime,
    rules: &BusinessRules,
) -> Result<()> {
    if role == CancelRole::Owner && &appointment.owner != requester {
        return Err(BookingError::NotOwner);
    }

    let starts_at = appointment.starts_at();
    if starts_at < now {
        return Err(BookingError::PastAppointment);
    }

    if role == CancelRole::Owner && starts_at < now + rules.cancel_notice() {
        return Err(BookingError::TooCloseToCancel {
            hours: rules.cancel_notice_hours,
        });
    }

    Ok(())
}
