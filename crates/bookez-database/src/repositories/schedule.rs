//! Schedule repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_core::types::id::{BookingId, MemberId, RoomId};
use bookez_entity::schedule::{Schedule, TimeWindow};

/// Repository for schedule rows and conflict queries.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the schedule for a booking.
    pub async fn find_by_booking(&self, booking_id: BookingId) -> AppResult<Option<Schedule>> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find schedule", e))
    }

    /// List AKTIF schedule windows for a room on a date (browse view).
    pub async fn find_for_room_on_date(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> AppResult<Vec<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            "SELECT s.* FROM schedules s JOIN bookings b ON b.id = s.booking_id \
             WHERE b.room_id = $1 AND b.status = 'aktif' AND s.date = $2 \
             ORDER BY s.start_time ASC",
        )
        .bind(room_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list room schedules", e)
        })
    }

    /// Whether the requested window overlaps an AKTIF schedule for the
    /// same room. Any overlap counts; `exclude_booking` skips the
    /// booking's own row during a reschedule.
    pub async fn room_has_conflict(
        &self,
        room_id: RoomId,
        window: &TimeWindow,
        exclude_booking: Option<BookingId>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM schedules s \
             JOIN bookings b ON b.id = s.booking_id \
             WHERE b.room_id = $1 AND b.status = 'aktif' AND s.date = $2 \
             AND s.start_time < $4 AND s.end_time > $3 \
             AND ($5::uuid IS NULL OR s.booking_id <> $5))",
        )
        .bind(room_id)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .bind(exclude_booking.map(|id| id.into_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check room conflicts", e)
        })
    }

    /// Members among the given set who already hold an AKTIF schedule
    /// overlapping the requested window on a different booking.
    pub async fn members_with_conflict(
        &self,
        member_ids: &[MemberId],
        window: &TimeWindow,
        exclude_booking: Option<BookingId>,
    ) -> AppResult<Vec<MemberId>> {
        let raw: Vec<Uuid> = member_ids.iter().map(|id| id.into_uuid()).collect();
        let rows = sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT bm.member_id FROM booking_members bm \
             JOIN bookings b ON b.id = bm.booking_id \
             JOIN schedules s ON s.booking_id = b.id \
             WHERE bm.member_id = ANY($1) AND b.status = 'aktif' AND s.date = $2 \
             AND s.start_time < $4 AND s.end_time > $3 \
             AND ($5::uuid IS NULL OR b.id <> $5)",
        )
        .bind(&raw)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .bind(exclude_booking.map(|id| id.into_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check member conflicts", e)
        })?;

        Ok(rows.into_iter().map(MemberId::from_uuid).collect())
    }
}
