//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::RoomId;

use super::kind::{RoomAvailability, RoomKind};

/// A bookable room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Display name (e.g. "Discussion Room 2A").
    pub name: String,
    /// Room kind.
    pub kind: RoomKind,
    /// Minimum occupant count for a booking.
    pub capacity_min: i32,
    /// Maximum occupant count for a booking.
    pub capacity_max: i32,
    /// Derived availability flag.
    pub availability: RoomAvailability,
    /// Opaque reference to the room photo (upload handling is external).
    pub photo_ref: Option<String>,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Whether a roster of `size` members fits this room.
    pub fn fits(&self, size: usize) -> bool {
        let size = size as i32;
        size >= self.capacity_min && size <= self.capacity_max
    }
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Display name.
    pub name: String,
    /// Room kind.
    pub kind: RoomKind,
    /// Minimum occupant count.
    pub capacity_min: i32,
    /// Maximum occupant count.
    pub capacity_max: i32,
    /// Photo reference (optional).
    pub photo_ref: Option<String>,
}

/// Data for updating an existing room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// New display name.
    pub name: Option<String>,
    /// New minimum occupant count.
    pub capacity_min: Option<i32>,
    /// New maximum occupant count.
    pub capacity_max: Option<i32>,
    /// New photo reference.
    pub photo_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(min: i32, max: i32) -> Room {
        Room {
            id: RoomId::new(),
            name: "Discussion Room 2A".to_string(),
            kind: RoomKind::General,
            capacity_min: min,
            capacity_max: max,
            availability: RoomAvailability::Available,
            photo_ref: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fits_bounds_inclusive() {
        let r = room(2, 4);
        assert!(!r.fits(1));
        assert!(r.fits(2));
        assert!(r.fits(4));
        assert!(!r.fits(5));
    }
}
