//! Admin room management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use bookez_core::error::AppError;
use bookez_core::types::id::RoomId;
use bookez_entity::room::{CreateRoom, UpdateRoom};

use crate::dto::request::{CreateRoomDto, UpdateRoomDto};
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::state::AppState;

/// POST /api/admin/rooms
pub async fn create_room(
    State(state): State<AppState>,
    identity: Identity,
    Json(dto): Json<CreateRoomDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let room = state
        .room_service
        .create_room(
            identity.ctx(),
            CreateRoom {
                name: dto.name,
                kind: dto.kind,
                capacity_min: dto.capacity_min,
                capacity_max: dto.capacity_max,
                photo_ref: dto.photo_ref,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": room })))
}

/// PUT /api/admin/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateRoomDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let room = state
        .room_service
        .update_room(
            identity.ctx(),
            RoomId::from_uuid(id),
            UpdateRoom {
                name: dto.name,
                capacity_min: dto.capacity_min,
                capacity_max: dto.capacity_max,
                photo_ref: dto.photo_ref,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": room })))
}

/// DELETE /api/admin/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .room_service
        .delete_room(identity.ctx(), RoomId::from_uuid(id))
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Room deleted" } }),
    ))
}
