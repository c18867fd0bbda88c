//! Schedule entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::{BookingId, ScheduleId};

use super::window::TimeWindow;

/// The concrete date and time window reserved by a booking.
///
/// One row per booking. A reschedule replaces date/start/end/reason in
/// place; the row's identity never changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: ScheduleId,
    /// The booking this schedule belongs to.
    pub booking_id: BookingId,
    /// Calendar date of the session.
    pub date: NaiveDate,
    /// Start time (inclusive).
    pub start_time: NaiveTime,
    /// End time (exclusive).
    pub end_time: NaiveTime,
    /// Reason recorded on the last reschedule, if any.
    pub reschedule_reason: Option<String>,
    /// When the schedule was created.
    pub created_at: DateTime<Utc>,
    /// When the schedule was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// The schedule's time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.date, self.start_time, self.end_time)
    }
}
