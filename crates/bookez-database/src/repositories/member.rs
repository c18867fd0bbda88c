//! Member repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bookez_core::error::{AppError, ErrorKind};
use bookez_core::result::AppResult;
use bookez_core::types::id::MemberId;
use bookez_entity::member::Member;

/// Repository for member lookups.
///
/// The booking core never creates or mutates member accounts; it only
/// reads them for roster eligibility checks.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a member by ID.
    pub async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    /// Fetch all members matching the given IDs.
    ///
    /// Missing IDs are simply absent from the result; the caller compares
    /// lengths to detect unknown members.
    pub async fn find_by_ids(&self, ids: &[MemberId]) -> AppResult<Vec<Member>> {
        let raw: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ANY($1)")
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find members", e))
    }
}
