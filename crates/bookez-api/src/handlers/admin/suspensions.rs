//! Admin suspension and violation views.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use bookez_core::types::id::MemberId;
use bookez_core::types::pagination::PageRequest;

use crate::error::ApiError;
use crate::extractors::Identity;
use crate::state::AppState;

/// Query parameters for the violation list.
#[derive(Debug, Deserialize)]
pub struct ViolationListQuery {
    /// Filter by member.
    pub member_id: Option<Uuid>,
    /// Page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}

/// GET /api/admin/suspensions
pub async fn list_suspensions(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<ViolationListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = PageRequest::new(query.page, query.per_page);
    let result = state
        .violation_tracker
        .list_suspensions(identity.ctx(), page)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/admin/violations
pub async fn list_violations(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<ViolationListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = PageRequest::new(query.page, query.per_page);
    let result = state
        .violation_tracker
        .list_violations(
            identity.ctx(),
            query.member_id.map(MemberId::from_uuid),
            page,
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}
