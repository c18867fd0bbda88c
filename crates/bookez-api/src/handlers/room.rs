//! Room browse handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use bookez_core::types::id::RoomId;

use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// Query parameters for the room detail view.
#[derive(Debug, Deserialize)]
pub struct RoomDetailQuery {
    /// Date to show reserved windows for (default: today).
    pub date: Option<NaiveDate>,
}

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .room_service
        .list_rooms(params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RoomDetailQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let on_date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let detail = state
        .room_service
        .get_room(RoomId::from_uuid(id), on_date)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}
