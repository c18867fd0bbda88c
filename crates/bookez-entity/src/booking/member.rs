//! Booking roster entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::{BookingId, MemberId};

/// One member on a booking's roster.
///
/// Exactly one row per booking has `is_leader = true`; member IDs are
/// unique within a booking. Check-in is per member, on the scheduled date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingMember {
    /// The booking this entry belongs to.
    pub booking_id: BookingId,
    /// The member.
    pub member_id: MemberId,
    /// Whether this member is the booking's leader (ketua).
    pub is_leader: bool,
    /// Whether this member has checked in.
    pub checked_in: bool,
    /// When the member checked in.
    pub checked_in_at: Option<DateTime<Utc>>,
}
