//! JSON request bodies.
//!
//! DTOs validate shape only (lengths, counts); the booking rules
//! themselves live in the service layer.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// POST /api/bookings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    /// Room to book.
    pub room_id: Uuid,
    /// Session date.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Additional roster members (the caller is the leader).
    #[validate(length(max = 19))]
    #[serde(default)]
    pub participants: Vec<Uuid>,
}

/// POST /api/admin/bookings/external
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExternalBookingDto {
    /// Contact member who leads the external booking.
    pub leader_id: Uuid,
    /// Room to book.
    pub room_id: Uuid,
    /// Session date.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Additional roster members.
    #[validate(length(max = 19))]
    #[serde(default)]
    pub participants: Vec<Uuid>,
    /// Reference to the filed attachment (upload handled externally).
    #[validate(length(max = 512))]
    pub attachment_ref: Option<String>,
}

/// PUT /api/bookings/{id}/reschedule
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RescheduleDto {
    /// New session date.
    pub date: NaiveDate,
    /// New start time.
    pub start_time: NaiveTime,
    /// New end time.
    pub end_time: NaiveTime,
    /// Reason for the change.
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// POST /api/admin/rooms
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomDto {
    /// Display name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Room kind: `general` or `meeting`.
    pub kind: bookez_entity::room::RoomKind,
    /// Minimum occupant count.
    pub capacity_min: i32,
    /// Maximum occupant count.
    pub capacity_max: i32,
    /// Photo reference.
    #[validate(length(max = 512))]
    pub photo_ref: Option<String>,
}

/// PUT /api/admin/rooms/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoomDto {
    /// New display name.
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    /// New minimum occupant count.
    pub capacity_min: Option<i32>,
    /// New maximum occupant count.
    pub capacity_max: Option<i32>,
    /// New photo reference.
    #[validate(length(max = 512))]
    pub photo_ref: Option<String>,
}

/// PUT /api/admin/calendar/hours/{weekday}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetHoursDto {
    /// Opening time.
    pub open_time: NaiveTime,
    /// Closing time.
    pub close_time: NaiveTime,
    /// Whether bookings are taken on this weekday.
    pub active: bool,
}

/// POST /api/admin/calendar/holidays
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddHolidayDto {
    /// Holiday date.
    pub date: NaiveDate,
    /// Display label.
    #[validate(length(min = 1, max = 120))]
    pub label: String,
}
