//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::{BookingId, MemberId, RoomId};

use super::status::BookingStatus;

/// A booking header.
///
/// The member roster lives in [`super::member::BookingMember`] rows and the
/// concrete time window in the schedule row; the header carries the room,
/// status, and derived duration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Human-readable booking code (e.g. `BK-7F3A2C4D`).
    pub code: String,
    /// The booked room.
    pub room_id: RoomId,
    /// Duration in minutes, recomputed on reschedule.
    pub duration_minutes: i32,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Attachment reference, set only on admin-filed external bookings.
    pub attachment_ref: Option<String>,
    /// The member who created the booking (the leader, or the filing
    /// admin for external bookings).
    pub created_by: MemberId,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Generated booking code.
    pub code: String,
    /// The room to book.
    pub room_id: RoomId,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Attachment reference (external bookings only).
    pub attachment_ref: Option<String>,
    /// The creating member.
    pub created_by: MemberId,
}
