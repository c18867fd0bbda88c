//! Room registry service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use bookez_core::error::AppError;
use bookez_core::result::AppResult;
use bookez_core::types::id::RoomId;
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_database::repositories::room::RoomRepository;
use bookez_database::repositories::schedule::ScheduleRepository;
use bookez_entity::room::{CreateRoom, Room, UpdateRoom};
use bookez_entity::schedule::Schedule;

use crate::context::RequestContext;

/// A room with its reserved windows for one date (the browse view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetail {
    /// The room.
    pub room: Room,
    /// AKTIF schedule windows on the requested date, earliest first.
    pub schedules: Vec<Schedule>,
}

/// Manages room records; capacity ordering and delete guards live here.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Schedule repository, for the browse view.
    schedule_repo: Arc<ScheduleRepository>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(room_repo: Arc<RoomRepository>, schedule_repo: Arc<ScheduleRepository>) -> Self {
        Self {
            room_repo,
            schedule_repo,
        }
    }

    /// Lists rooms with pagination.
    pub async fn list_rooms(&self, page: PageRequest) -> AppResult<PageResponse<Room>> {
        self.room_repo.find_all(&page).await
    }

    /// Fetches a room and its reserved windows on the given date.
    pub async fn get_room(&self, room_id: RoomId, on_date: NaiveDate) -> AppResult<RoomDetail> {
        let room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))?;

        let schedules = self
            .schedule_repo
            .find_for_room_on_date(room_id, on_date)
            .await?;

        Ok(RoomDetail { room, schedules })
    }

    /// Creates a room (admin only).
    pub async fn create_room(&self, ctx: &RequestContext, data: CreateRoom) -> AppResult<Room> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility("Only administrators may create rooms"));
        }
        validate_capacity(data.capacity_min, data.capacity_max)?;

        let room = self.room_repo.create(&data).await?;
        info!(room_id = %room.id, name = %room.name, "Room created");
        Ok(room)
    }

    /// Updates a room's editable fields (admin only).
    pub async fn update_room(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        data: UpdateRoom,
    ) -> AppResult<Room> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility("Only administrators may update rooms"));
        }

        let mut room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))?;

        if let Some(name) = data.name {
            room.name = name;
        }
        if let Some(min) = data.capacity_min {
            room.capacity_min = min;
        }
        if let Some(max) = data.capacity_max {
            room.capacity_max = max;
        }
        if let Some(photo_ref) = data.photo_ref {
            room.photo_ref = Some(photo_ref);
        }
        validate_capacity(room.capacity_min, room.capacity_max)?;

        let room = self.room_repo.update(&room).await?;
        info!(room_id = %room.id, "Room updated");
        Ok(room)
    }

    /// Deletes a room (admin only). Refused while the room has AKTIF
    /// bookings.
    pub async fn delete_room(&self, ctx: &RequestContext, room_id: RoomId) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility("Only administrators may delete rooms"));
        }

        if self.room_repo.has_active_bookings(room_id).await? {
            return Err(AppError::state(
                "Room cannot be deleted while it has active bookings",
            ));
        }

        let deleted = self.room_repo.delete(room_id).await?;
        if !deleted {
            return Err(AppError::not_found("Room not found"));
        }

        info!(room_id = %room_id, "Room deleted");
        Ok(())
    }
}

/// Capacity ordering rule shared by create and update.
fn validate_capacity(min: i32, max: i32) -> AppResult<()> {
    if min < 1 {
        return Err(AppError::policy("Minimum capacity must be at least 1"));
    }
    if min >= max {
        return Err(AppError::policy(
            "Minimum capacity must be less than maximum capacity",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_ordering() {
        assert!(validate_capacity(2, 4).is_ok());
        assert!(validate_capacity(0, 4).is_err());
        assert!(validate_capacity(4, 4).is_err());
        assert!(validate_capacity(5, 4).is_err());
    }
}
