//! Booking lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a booking.
///
/// The domain terms are kept: AKTIF (active), SELESAI (finished),
/// DIBATALKAN (cancelled by the leader), HANGUS (forfeited for no-show).
/// A booking is created AKTIF and moves to exactly one terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Live booking; the only status from which transitions happen.
    Aktif,
    /// Finished: completed by the leader or auto-closed with check-ins.
    Selesai,
    /// Cancelled by the leader before the session.
    Dibatalkan,
    /// Forfeited: nobody checked in within the grace window.
    Hangus,
}

impl BookingStatus {
    /// Check if the booking is live.
    pub fn is_aktif(&self) -> bool {
        matches!(self, Self::Aktif)
    }

    /// Check if the status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        !self.is_aktif()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aktif => "aktif",
            Self::Selesai => "selesai",
            Self::Dibatalkan => "dibatalkan",
            Self::Hangus => "hangus",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = bookez_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aktif" => Ok(Self::Aktif),
            "selesai" => Ok(Self::Selesai),
            "dibatalkan" => Ok(Self::Dibatalkan),
            "hangus" => Ok(Self::Hangus),
            _ => Err(bookez_core::AppError::validation(format!(
                "Invalid booking status: '{s}'. Expected one of: aktif, selesai, dibatalkan, hangus"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_aktif_is_live() {
        assert!(BookingStatus::Aktif.is_aktif());
        assert!(BookingStatus::Selesai.is_terminal());
        assert!(BookingStatus::Dibatalkan.is_terminal());
        assert!(BookingStatus::Hangus.is_terminal());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "HANGUS".parse::<BookingStatus>().unwrap(),
            BookingStatus::Hangus
        );
        assert!("expired".parse::<BookingStatus>().is_err());
    }
}
