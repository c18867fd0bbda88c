//! Room kind and availability enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of bookable room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// General-purpose study room, self-bookable by members.
    General,
    /// Meeting room, reserved for admin-filed external bookings.
    Meeting,
}

impl RoomKind {
    /// Whether members may book this room kind themselves.
    pub fn is_self_bookable(&self) -> bool {
        matches!(self, Self::General)
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Meeting => "meeting",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomKind {
    type Err = bookez_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "meeting" => Ok(Self::Meeting),
            _ => Err(bookez_core::AppError::validation(format!(
                "Invalid room kind: '{s}'. Expected one of: general, meeting"
            ))),
        }
    }
}

/// Derived availability flag for a room.
///
/// Not authoritative: recomputed by the transition engine from AKTIF
/// bookings whose window contains the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_availability", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomAvailability {
    /// No AKTIF booking currently occupies the room.
    Available,
    /// An AKTIF booking's window contains the current instant.
    InUse,
}

impl RoomAvailability {
    /// Return the availability as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
        }
    }
}

impl fmt::Display for RoomAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_bookable() {
        assert!(RoomKind::General.is_self_bookable());
        assert!(!RoomKind::Meeting.is_self_bookable());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("meeting".parse::<RoomKind>().unwrap(), RoomKind::Meeting);
        assert!("lounge".parse::<RoomKind>().is_err());
    }
}
