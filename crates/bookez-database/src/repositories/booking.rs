//! Booking repository implementation.
//!
//! Holds the booking header, the roster rows, the transactional commit
//! used by the orchestrator, and the bulk status-transition statements
//! used by the sweep engine.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_core::types::id::{BookingId, MemberId, RoomId};
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_entity::booking::{Booking, BookingMember, BookingStatus, CreateBooking};
use bookez_entity::schedule::TimeWindow;

/// Repository for booking headers and roster rows.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// Find the AKTIF booking a member is on (leader or participant), if any.
    pub async fn find_aktif_for_member(
        &self,
        member_id: MemberId,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b JOIN booking_members bm ON bm.booking_id = b.id \
             WHERE bm.member_id = $1 AND b.status = 'aktif' LIMIT 1",
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active booking", e)
        })
    }

    /// List bookings a member is on, newest first.
    pub async fn find_by_member(
        &self,
        member_id: MemberId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings b JOIN booking_members bm ON bm.booking_id = b.id \
             WHERE bm.member_id = $1",
        )
        .bind(member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b JOIN booking_members bm ON bm.booking_id = b.id \
             WHERE bm.member_id = $1 ORDER BY b.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(member_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all bookings, optionally filtered by status (admin view).
    pub async fn find_all(
        &self,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE ($1::booking_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE ($1::booking_status IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// The full roster of a booking, leader first.
    pub async fn find_members(&self, booking_id: BookingId) -> AppResult<Vec<BookingMember>> {
        sqlx::query_as::<_, BookingMember>(
            "SELECT * FROM booking_members WHERE booking_id = $1 \
             ORDER BY is_leader DESC, member_id ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roster", e))
    }

    /// Count the checked-in members on a booking.
    pub async fn count_checked_in(&self, booking_id: BookingId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM booking_members WHERE booking_id = $1 AND checked_in",
        )
        .bind(booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count check-ins", e)
        })?;
        Ok(count)
    }

    /// Set one member's check-in flag. A member already checked in is
    /// left untouched; returns whether the flag changed.
    pub async fn check_in_member(
        &self,
        booking_id: BookingId,
        member_id: MemberId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE booking_members SET checked_in = TRUE, checked_in_at = $3 \
             WHERE booking_id = $1 AND member_id = $2 AND NOT checked_in",
        )
        .bind(booking_id)
        .bind(member_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check in member", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check in every not-yet-checked-in roster member. Returns how many
    /// flags changed.
    pub async fn check_in_all(&self, booking_id: BookingId, at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE booking_members SET checked_in = TRUE, checked_in_at = $2 \
             WHERE booking_id = $1 AND NOT checked_in",
        )
        .bind(booking_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check in roster", e))?;

        Ok(result.rows_affected())
    }

    /// Move an AKTIF booking to a terminal status. Returns false when the
    /// booking was not AKTIF (already transitioned by someone else).
    pub async fn transition_from_aktif(
        &self,
        booking_id: BookingId,
        to: BookingStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'aktif'",
        )
        .bind(booking_id)
        .bind(to)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to transition booking", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Commit a validated reservation atomically.
    ///
    /// Locks the room row, re-checks the room and roster conflicts under
    /// the lock, then inserts the booking header, the roster, and the
    /// schedule. Either all four writes land or none do. The re-check
    /// closes the window between the orchestrator's validation SELECTs
    /// and this INSERT: two concurrent requests for the same room
    /// serialize on the lock and the loser sees the winner's schedule.
    pub async fn create_booked(
        &self,
        data: &CreateBooking,
        roster: &[(MemberId, bool)],
        window: &TimeWindow,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(data.room_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock room", e))?;

        let room_conflict: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM schedules s \
             JOIN bookings b ON b.id = s.booking_id \
             WHERE b.room_id = $1 AND b.status = 'aktif' AND s.date = $2 \
             AND s.start_time < $4 AND s.end_time > $3)",
        )
        .bind(data.room_id)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-check room conflict", e)
        })?;

        if room_conflict {
            return Err(AppError::conflict(
                "Room is already booked for the requested time slot",
            ));
        }

        let member_uuids: Vec<Uuid> = roster.iter().map(|(id, _)| id.into_uuid()).collect();
        let member_conflict: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM booking_members bm \
             JOIN bookings b ON b.id = bm.booking_id \
             JOIN schedules s ON s.booking_id = b.id \
             WHERE bm.member_id = ANY($1) AND b.status = 'aktif' AND s.date = $2 \
             AND s.start_time < $4 AND s.end_time > $3)",
        )
        .bind(&member_uuids)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-check roster conflict", e)
        })?;

        if member_conflict {
            return Err(AppError::conflict(
                "A roster member already holds an overlapping booking",
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (code, room_id, duration_minutes, status, attachment_ref, created_by) \
             VALUES ($1, $2, $3, 'aktif', $4, $5) RETURNING *",
        )
        .bind(&data.code)
        .bind(data.room_id)
        .bind(data.duration_minutes)
        .bind(&data.attachment_ref)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))?;

        for (member_id, is_leader) in roster {
            sqlx::query(
                "INSERT INTO booking_members (booking_id, member_id, is_leader) \
                 VALUES ($1, $2, $3)",
            )
            .bind(booking.id)
            .bind(member_id)
            .bind(is_leader)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to add roster member", e)
            })?;
        }

        sqlx::query(
            "INSERT INTO schedules (booking_id, date, start_time, end_time) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(booking.id)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create schedule", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(booking)
    }

    /// Replace a booking's schedule window atomically.
    ///
    /// Same lock-and-recheck discipline as [`Self::create_booked`]: the
    /// room row is locked, the new window is re-checked against every
    /// other AKTIF schedule for the room, then the schedule row and the
    /// booking's duration are updated together.
    pub async fn reschedule_booked(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
        window: &TimeWindow,
        reason: Option<&str>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock room", e))?;

        let room_conflict: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM schedules s \
             JOIN bookings b ON b.id = s.booking_id \
             WHERE b.room_id = $1 AND b.status = 'aktif' AND s.date = $2 \
             AND s.start_time < $4 AND s.end_time > $3 AND s.booking_id <> $5)",
        )
        .bind(room_id)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-check room conflict", e)
        })?;

        if room_conflict {
            return Err(AppError::conflict(
                "Room is already booked for the requested time slot",
            ));
        }

        sqlx::query(
            "UPDATE schedules SET date = $2, start_time = $3, end_time = $4, \
             reschedule_reason = $5, updated_at = NOW() WHERE booking_id = $1",
        )
        .bind(booking_id)
        .bind(window.date)
        .bind(window.start)
        .bind(window.end)
        .bind(reason)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update schedule", e)
        })?;

        sqlx::query(
            "UPDATE bookings SET duration_minutes = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(booking_id)
        .bind(window.duration_minutes() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update duration", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reschedule", e)
        })?;

        Ok(())
    }

    /// Forfeit AKTIF bookings whose start passed the grace cutoff with
    /// zero check-ins. Returns the forfeited booking and room IDs.
    /// Idempotent: already-transitioned bookings no longer match.
    pub async fn forfeit_no_shows(
        &self,
        started_before: NaiveDateTime,
    ) -> AppResult<Vec<(BookingId, RoomId)>> {
        sqlx::query_as::<_, (BookingId, RoomId)>(
            "UPDATE bookings b SET status = 'hangus', updated_at = NOW() \
             FROM schedules s WHERE s.booking_id = b.id AND b.status = 'aktif' \
             AND (s.date + s.start_time) < $1 \
             AND NOT EXISTS (SELECT 1 FROM booking_members bm \
                             WHERE bm.booking_id = b.id AND bm.checked_in) \
             RETURNING b.id, b.room_id",
        )
        .bind(started_before)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to forfeit no-shows", e)
        })
    }

    /// Close out AKTIF bookings whose window ended with at least one
    /// check-in. Returns the completed booking IDs. Idempotent.
    pub async fn complete_attended(
        &self,
        ended_before: NaiveDateTime,
    ) -> AppResult<Vec<BookingId>> {
        sqlx::query_scalar::<_, BookingId>(
            "UPDATE bookings b SET status = 'selesai', updated_at = NOW() \
             FROM schedules s WHERE s.booking_id = b.id AND b.status = 'aktif' \
             AND (s.date + s.end_time) <= $1 \
             AND EXISTS (SELECT 1 FROM booking_members bm \
                         WHERE bm.booking_id = b.id AND bm.checked_in) \
             RETURNING b.id",
        )
        .bind(ended_before)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete bookings", e)
        })
    }
}
