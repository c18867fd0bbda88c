//! Admin booking handlers: external bookings, oversight, assisted
//! check-in, and the manual sweep trigger.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use bookez_core::error::AppError;
use bookez_core::types::id::{BookingId, MemberId, RoomId};
use bookez_entity::booking::BookingStatus;
use bookez_service::booking::CreateBookingRequest;

use crate::dto::request::CreateExternalBookingDto;
use crate::error::ApiError;
use crate::extractors::{Identity, PaginationParams};
use crate::state::AppState;

/// Query parameters for the admin booking list.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    /// Filter by status (`aktif`, `selesai`, `dibatalkan`, `hangus`).
    pub status: Option<String>,
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

/// POST /api/admin/bookings/external
pub async fn create_external_booking(
    State(state): State<AppState>,
    identity: Identity,
    Json(dto): Json<CreateExternalBookingDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .create_external_booking(
            identity.ctx(),
            MemberId::from_uuid(dto.leader_id),
            CreateBookingRequest {
                room_id: RoomId::from_uuid(dto.room_id),
                date: dto.date,
                start_time: dto.start_time,
                end_time: dto.end_time,
                participants: dto.participants.into_iter().map(MemberId::from_uuid).collect(),
            },
            dto.attachment_ref,
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": booking })))
}

/// GET /api/admin/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<BookingStatus>)
        .transpose()?;

    let page = PaginationParams {
        page: query.page,
        per_page: query.per_page,
    }
    .into_page_request();

    let result = state
        .booking_service
        .list_all_bookings(identity.ctx(), status, page)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/admin/bookings/{id}/check-in/{member_id}
pub async fn check_in_member(
    State(state): State<AppState>,
    identity: Identity,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .booking_service
        .check_in(
            identity.ctx(),
            BookingId::from_uuid(id),
            MemberId::from_uuid(member_id),
        )
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Member checked in" } }),
    ))
}

/// POST /api/admin/bookings/{id}/check-in-all
pub async fn check_in_all(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let count = state
        .booking_service
        .check_in_all(identity.ctx(), BookingId::from_uuid(id))
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "checked_in": count } }),
    ))
}

/// POST /api/admin/sweep — run the status sweep now.
///
/// The sweep is idempotent, so running it here composes safely with the
/// scheduled background run.
pub async fn run_sweep(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !identity.ctx().is_admin() {
        return Err(AppError::eligibility("Only administrators may trigger a sweep").into());
    }

    let report = state.sweep_job.run().await?;

    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}
