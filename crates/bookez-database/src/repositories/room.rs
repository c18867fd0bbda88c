//! Room repository implementation.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_core::types::id::RoomId;
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_entity::room::{CreateRoom, Room};

/// Repository for room CRUD and the availability recompute.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by ID.
    pub async fn find_by_id(&self, id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    /// List rooms with pagination, ordered by name.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Room>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))?;

        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms ORDER BY name ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new room.
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (name, kind, capacity_min, capacity_max, photo_ref) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.kind)
        .bind(data.capacity_min)
        .bind(data.capacity_max)
        .bind(&data.photo_ref)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create room", e))
    }

    /// Update a room's editable fields.
    pub async fn update(&self, room: &Room) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET name = $2, capacity_min = $3, capacity_max = $4, \
             photo_ref = $5, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(room.capacity_min)
        .bind(room.capacity_max)
        .bind(&room.photo_ref)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update room", e))
    }

    /// Delete a room by ID.
    pub async fn delete(&self, id: RoomId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete room", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the room has any AKTIF booking (delete guard).
    pub async fn has_active_bookings(&self, id: RoomId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE room_id = $1 AND status = 'aktif')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check active bookings", e)
        })
    }

    /// Recompute every room's availability flag for the given instant.
    ///
    /// A room is `in_use` iff an AKTIF booking's schedule window contains
    /// the instant. Both statements are no-ops for rooms already carrying
    /// the right flag, so the recompute is idempotent. Returns the number
    /// of rooms whose flag changed.
    pub async fn recompute_availability(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<u64> {
        let occupied = sqlx::query(
            "UPDATE rooms SET availability = 'in_use' WHERE availability <> 'in_use' \
             AND id IN (SELECT b.room_id FROM bookings b \
                        JOIN schedules s ON s.booking_id = b.id \
                        WHERE b.status = 'aktif' AND s.date = $1 \
                        AND s.start_time <= $2 AND s.end_time > $2)",
        )
        .bind(date)
        .bind(time)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark rooms in use", e)
        })?;

        let released = sqlx::query(
            "UPDATE rooms SET availability = 'available' WHERE availability <> 'available' \
             AND id NOT IN (SELECT b.room_id FROM bookings b \
                            JOIN schedules s ON s.booking_id = b.id \
                            WHERE b.status = 'aktif' AND s.date = $1 \
                            AND s.start_time <= $2 AND s.end_time > $2)",
        )
        .bind(date)
        .bind(time)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to release rooms", e)
        })?;

        Ok(occupied.rows_affected() + released.rows_affected())
    }
}
