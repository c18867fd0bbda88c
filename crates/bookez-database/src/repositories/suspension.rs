//! Violation and suspension repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_core::types::id::{BookingId, MemberId};
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_entity::suspension::{Suspension, SuspensionReason, Violation};

/// Repository for no-show violations and derived suspensions.
#[derive(Debug, Clone)]
pub struct SuspensionRepository {
    pool: PgPool,
}

impl SuspensionRepository {
    /// Create a new suspension repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a no-show violation for a member.
    pub async fn record_violation(
        &self,
        member_id: MemberId,
        booking_id: BookingId,
        occurred_at: DateTime<Utc>,
    ) -> AppResult<Violation> {
        sqlx::query_as::<_, Violation>(
            "INSERT INTO violations (member_id, booking_id, occurred_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(member_id)
        .bind(booking_id)
        .bind(occurred_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record violation", e))
    }

    /// Count a member's violations at or after the given instant.
    pub async fn count_violations_since(
        &self,
        member_id: MemberId,
        since: DateTime<Utc>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM violations WHERE member_id = $1 AND occurred_at >= $2",
        )
        .bind(member_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count violations", e)
        })?;
        Ok(count)
    }

    /// Find a member's unexpired suspension, if any.
    pub async fn find_active_for_member(
        &self,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Suspension>> {
        sqlx::query_as::<_, Suspension>(
            "SELECT * FROM suspensions WHERE member_id = $1 AND ends_at > $2 \
             ORDER BY ends_at DESC LIMIT 1",
        )
        .bind(member_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active suspension", e)
        })
    }

    /// Create or refresh the member's suspension so it spans the new
    /// window. An existing unexpired row is replaced in place; the block
    /// always extends from the latest violation.
    pub async fn upsert(
        &self,
        member_id: MemberId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        reason: SuspensionReason,
    ) -> AppResult<Suspension> {
        let refreshed = sqlx::query_as::<_, Suspension>(
            "UPDATE suspensions SET starts_at = $2, ends_at = $3, reason = $4 \
             WHERE member_id = $1 AND ends_at > $2 RETURNING *",
        )
        .bind(member_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to refresh suspension", e)
        })?;

        if let Some(suspension) = refreshed {
            return Ok(suspension);
        }

        sqlx::query_as::<_, Suspension>(
            "INSERT INTO suspensions (member_id, starts_at, ends_at, reason) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(member_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create suspension", e)
        })
    }

    /// List unexpired suspensions (admin view).
    pub async fn find_all_active(
        &self,
        now: DateTime<Utc>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Suspension>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM suspensions WHERE ends_at > $1")
                .bind(now)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count suspensions", e)
                })?;

        let suspensions = sqlx::query_as::<_, Suspension>(
            "SELECT * FROM suspensions WHERE ends_at > $1 \
             ORDER BY ends_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(now)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list suspensions", e)
        })?;

        Ok(PageResponse::new(
            suspensions,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List recorded violations, newest first (admin view).
    pub async fn find_violations(
        &self,
        member_id: Option<MemberId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Violation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM violations WHERE ($1::uuid IS NULL OR member_id = $1)",
        )
        .bind(member_id.map(|id| id.into_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count violations", e)
        })?;

        let violations = sqlx::query_as::<_, Violation>(
            "SELECT * FROM violations WHERE ($1::uuid IS NULL OR member_id = $1) \
             ORDER BY occurred_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(member_id.map(|id| id.into_uuid()))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list violations", e)
        })?;

        Ok(PageResponse::new(
            violations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Delete suspensions that expired before the cutoff.
    pub async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM suspensions WHERE ends_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup suspensions", e)
            })?;

        Ok(result.rows_affected())
    }
}
