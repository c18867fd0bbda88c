//! Operating constraint entity models.
//!
//! The booking core consumes these rows but does not own the policy behind
//! them; admins maintain them through the admin surface.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::HolidayId;

/// Open/close window for one weekday.
///
/// `weekday` is the ISO number, Monday = 1 through Sunday = 7. An inactive
/// row means the university takes no bookings that weekday.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OperatingHours {
    /// ISO weekday number (1 = Monday .. 7 = Sunday).
    pub weekday: i16,
    /// Opening time.
    pub open_time: NaiveTime,
    /// Closing time.
    pub close_time: NaiveTime,
    /// Whether bookings are taken on this weekday at all.
    pub active: bool,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A holiday date on which no bookings are taken.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holiday {
    /// Unique holiday identifier.
    pub id: HolidayId,
    /// The holiday date.
    pub date: NaiveDate,
    /// Display label (e.g. "Independence Day").
    pub label: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}
