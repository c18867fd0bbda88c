//! Booking lifecycle handlers (member self-service).

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use bookez_core::error::AppError;
use bookez_core::types::id::{BookingId, MemberId, RoomId};
use bookez_service::booking::{CreateBookingRequest, RescheduleRequest};

use crate::dto::request::{CreateBookingDto, RescheduleDto};
use crate::error::ApiError;
use crate::extractors::{Identity, PaginationParams};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    identity: Identity,
    Json(dto): Json<CreateBookingDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .create_booking(
            identity.ctx(),
            CreateBookingRequest {
                room_id: RoomId::from_uuid(dto.room_id),
                date: dto.date,
                start_time: dto.start_time,
                end_time: dto.end_time,
                participants: dto.participants.into_iter().map(MemberId::from_uuid).collect(),
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": booking })))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    identity: Identity,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .booking_service
        .list_bookings(identity.ctx(), params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let detail = state
        .booking_service
        .get_booking(identity.ctx(), BookingId::from_uuid(id))
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}

/// PUT /api/bookings/{id}/reschedule
pub async fn reschedule(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(dto): Json<RescheduleDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let detail = state
        .booking_service
        .reschedule(
            identity.ctx(),
            BookingId::from_uuid(id),
            RescheduleRequest {
                date: dto.date,
                start_time: dto.start_time,
                end_time: dto.end_time,
                reason: dto.reason,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": detail })))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .booking_service
        .cancel(identity.ctx(), BookingId::from_uuid(id))
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Booking cancelled" } }),
    ))
}

/// POST /api/bookings/{id}/check-in
pub async fn check_in(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let member_id = identity.ctx().member_id;
    state
        .booking_service
        .check_in(identity.ctx(), BookingId::from_uuid(id), member_id)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Checked in" } }),
    ))
}

/// POST /api/bookings/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .booking_service
        .complete(identity.ctx(), BookingId::from_uuid(id))
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Booking completed" } }),
    ))
}
