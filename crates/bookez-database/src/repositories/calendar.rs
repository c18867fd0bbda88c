//! Operating-hours and holiday repository implementation.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_entity::calendar::{Holiday, OperatingHours};

/// Repository for operating constraints.
#[derive(Debug, Clone)]
pub struct CalendarRepository {
    pool: PgPool,
}

impl CalendarRepository {
    /// Create a new calendar repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the operating hours for an ISO weekday (1 = Monday).
    pub async fn find_hours(&self, weekday: i16) -> AppResult<Option<OperatingHours>> {
        sqlx::query_as::<_, OperatingHours>(
            "SELECT * FROM operating_hours WHERE weekday = $1",
        )
        .bind(weekday)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find operating hours", e)
        })
    }

    /// List the full week of operating hours.
    pub async fn find_all_hours(&self) -> AppResult<Vec<OperatingHours>> {
        sqlx::query_as::<_, OperatingHours>(
            "SELECT * FROM operating_hours ORDER BY weekday ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list operating hours", e)
        })
    }

    /// Insert or replace the operating hours for a weekday.
    pub async fn upsert_hours(
        &self,
        weekday: i16,
        open_time: NaiveTime,
        close_time: NaiveTime,
        active: bool,
    ) -> AppResult<OperatingHours> {
        sqlx::query_as::<_, OperatingHours>(
            "INSERT INTO operating_hours (weekday, open_time, close_time, active) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (weekday) DO UPDATE SET open_time = $2, close_time = $3, \
             active = $4, updated_at = NOW() RETURNING *",
        )
        .bind(weekday)
        .bind(open_time)
        .bind(close_time)
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert operating hours", e)
        })
    }

    /// Whether the given date is a holiday.
    pub async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM holidays WHERE date = $1)",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check holiday", e))
    }

    /// List all holidays, soonest first.
    pub async fn find_holidays(&self) -> AppResult<Vec<Holiday>> {
        sqlx::query_as::<_, Holiday>("SELECT * FROM holidays ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list holidays", e)
            })
    }

    /// Add a holiday.
    pub async fn add_holiday(&self, date: NaiveDate, label: &str) -> AppResult<Holiday> {
        sqlx::query_as::<_, Holiday>(
            "INSERT INTO holidays (date, label) VALUES ($1, $2) \
             ON CONFLICT (date) DO UPDATE SET label = $2 RETURNING *",
        )
        .bind(date)
        .bind(label)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add holiday", e))
    }

    /// Remove a holiday by date.
    pub async fn remove_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM holidays WHERE date = $1")
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove holiday", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
