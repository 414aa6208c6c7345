//! Service catalogue and fixed durations.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// A bookable service. The set is closed; each variant has a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Hair,
    Beard,
    /// Haircut followed by a beard trim. Booked as two adjacent half-hour
    /// uses of the chair rather than a native hour-long slot.
    HairAndBeard,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [ServiceType::Hair, ServiceType::Beard, ServiceType::HairAndBeard];

    pub fn duration_minutes(self) -> i64 {
        match self {
            ServiceType::Hair | ServiceType::Beard => 30,
            ServiceType::HairAndBeard => 60,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(self.duration_minutes())
    }

    /// Canonical upper-case name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Hair => "HAIR",
            ServiceType::Beard => "BEARD",
            ServiceType::HairAndBeard => "HAIR_AND_BEARD",
        }
    }

    /// Services whose existing bookings are checked when validating a new
    /// booking of this service. The combo clashes with either half.
    pub fn overlap_peers(self) -> &'static [ServiceType] {
        match self {
            ServiceType::Hair => &[ServiceType::Hair],
            ServiceType::Beard => &[ServiceType::Beard],
            ServiceType::HairAndBeard => &ServiceType::ALL,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == normalized)
            .ok_or_else(|| BookingError::UnknownServiceType(s.to_string()))
    }
}
