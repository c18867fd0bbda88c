//! Admin operating-calendar handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use validator::Validate;

use bookez_core::error::AppError;

use crate::dto::request::{AddHolidayDto, SetHoursDto};
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::state::AppState;

/// GET /api/calendar
pub async fn get_calendar(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hours = state.calendar_service.list_hours().await?;
    let holidays = state.calendar_service.list_holidays().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "hours": hours, "holidays": holidays },
    })))
}

/// PUT /api/admin/calendar/hours/{weekday}
pub async fn set_hours(
    State(state): State<AppState>,
    identity: Identity,
    Path(weekday): Path<i16>,
    Json(dto): Json<SetHoursDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hours = state
        .calendar_service
        .set_hours(
            identity.ctx(),
            weekday,
            dto.open_time,
            dto.close_time,
            dto.active,
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": hours })))
}

/// POST /api/admin/calendar/holidays
pub async fn add_holiday(
    State(state): State<AppState>,
    identity: Identity,
    Json(dto): Json<AddHolidayDto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let holiday = state
        .calendar_service
        .add_holiday(identity.ctx(), dto.date, &dto.label)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": holiday })))
}

/// DELETE /api/admin/calendar/holidays/{date}
pub async fn remove_holiday(
    State(state): State<AppState>,
    identity: Identity,
    Path(date): Path<NaiveDate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .calendar_service
        .remove_holiday(identity.ctx(), date)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Holiday removed" } }),
    ))
}
