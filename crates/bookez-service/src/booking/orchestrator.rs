//! Booking orchestrator: the entry point for every user- and admin-facing
//! booking operation.
//!
//! Validation runs in a fixed order and fails fast with a distinct typed
//! error per rule; nothing is written until every rule has passed, and the
//! final commit re-checks conflicts under a room lock.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use bookez_core::config::booking::BookingPolicyConfig;
use bookez_core::error::AppError;
use bookez_core::events::BookingEvent;
use bookez_core::result::AppResult;
use bookez_core::traits::calendar::OperatingCalendar;
use bookez_core::types::id::{BookingId, MemberId, RoomId};
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_database::repositories::booking::BookingRepository;
use bookez_database::repositories::member::MemberRepository;
use bookez_database::repositories::room::RoomRepository;
use bookez_database::repositories::schedule::ScheduleRepository;
use bookez_entity::booking::{Booking, BookingMember, BookingStatus, CreateBooking};
use bookez_entity::room::{Room, RoomAvailability};
use bookez_entity::schedule::{Schedule, TimeWindow};

use super::policy;
use crate::context::RequestContext;
use crate::violation::ViolationTracker;

/// Request to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The room to book.
    pub room_id: RoomId,
    /// The session date.
    pub date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Additional roster members (the leader is implicit).
    pub participants: Vec<MemberId>,
}

/// Request to move a booking to a new window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    /// The new session date.
    pub date: NaiveDate,
    /// New start time.
    pub start_time: NaiveTime,
    /// New end time.
    pub end_time: NaiveTime,
    /// Reason recorded on the schedule row.
    pub reason: Option<String>,
}

/// A booking with its schedule and roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    /// The booking header.
    pub booking: Booking,
    /// The schedule window.
    pub schedule: Schedule,
    /// The roster, leader first.
    pub members: Vec<BookingMember>,
}

/// Validates and commits reservations; owns every lifecycle operation a
/// caller can perform on a booking.
#[derive(Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Schedule repository.
    schedule_repo: Arc<ScheduleRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Member repository.
    member_repo: Arc<MemberRepository>,
    /// Violation tracker, for suspension checks.
    tracker: Arc<ViolationTracker>,
    /// Operating-hours/holiday provider.
    calendar: Arc<dyn OperatingCalendar>,
    /// Policy knobs.
    policy: BookingPolicyConfig,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        schedule_repo: Arc<ScheduleRepository>,
        room_repo: Arc<RoomRepository>,
        member_repo: Arc<MemberRepository>,
        tracker: Arc<ViolationTracker>,
        calendar: Arc<dyn OperatingCalendar>,
        policy: BookingPolicyConfig,
    ) -> Self {
        Self {
            booking_repo,
            schedule_repo,
            room_repo,
            member_repo,
            tracker,
            calendar,
            policy,
        }
    }

    /// Creates a self-service booking with the caller as leader.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        req: CreateBookingRequest,
    ) -> AppResult<Booking> {
        let leader = ctx.member_id;
        let now = ctx.request_time;

        self.ensure_not_blocked(leader, now).await?;

        // One active booking per person, system-wide.
        if self
            .booking_repo
            .find_aktif_for_member(leader)
            .await?
            .is_some()
        {
            return Err(AppError::policy(
                "You already have an active booking",
            ));
        }

        let room = self.load_room(req.room_id).await?;
        if !room.kind.is_self_bookable() {
            return Err(AppError::policy(
                "This room can only be booked through the administration",
            ));
        }

        let booking = self
            .validate_and_commit(&room, leader, &req, now, None)
            .await?;

        info!(
            booking_id = %booking.id,
            code = %booking.code,
            room_id = %room.id,
            leader_id = %leader,
            "Booking created"
        );

        Ok(booking)
    }

    /// Creates an external booking on behalf of a contact member
    /// (admin only). Meeting rooms are eligible and an attachment may be
    /// stored; every time, capacity, conflict, and roster rule still
    /// applies. The one-active-booking rule is skipped for the contact.
    pub async fn create_external_booking(
        &self,
        ctx: &RequestContext,
        leader: MemberId,
        req: CreateBookingRequest,
        attachment_ref: Option<String>,
    ) -> AppResult<Booking> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may file external bookings",
            ));
        }

        self.ensure_not_blocked(leader, ctx.request_time).await?;

        let room = self.load_room(req.room_id).await?;
        let booking = self
            .validate_and_commit(&room, leader, &req, ctx.request_time, attachment_ref)
            .await?;

        info!(
            booking_id = %booking.id,
            code = %booking.code,
            filed_by = %ctx.member_id,
            "External booking created"
        );

        Ok(booking)
    }

    /// Shared validation pipeline and transactional commit.
    ///
    /// Runs the remaining validation sequence (suspension, time window,
    /// operating constraints, capacity, roster eligibility, conflicts) and
    /// commits the booking, roster, and schedule atomically.
    async fn validate_and_commit(
        &self,
        room: &Room,
        leader: MemberId,
        req: &CreateBookingRequest,
        now: DateTime<Utc>,
        attachment_ref: Option<String>,
    ) -> AppResult<Booking> {
        let window = TimeWindow::new(req.date, req.start_time, req.end_time);
        let now_local = now.naive_utc();

        if room.availability != RoomAvailability::Available {
            return Err(AppError::state("Room is currently in use"));
        }

        policy::ensure_not_past(&window, now_local, self.policy.create_buffer_minutes)?;
        policy::ensure_duration(&window, &self.policy)?;
        self.ensure_operating_window(&window).await?;

        policy::ensure_capacity(room, req.participants.len() + 1)?;
        let roster = policy::build_roster(leader, &req.participants)?;
        self.ensure_roster_eligible(&roster, now).await?;

        if self
            .schedule_repo
            .room_has_conflict(room.id, &window, None)
            .await?
        {
            return Err(AppError::conflict(
                "Room is already booked for the requested time slot",
            ));
        }

        let clashing = self
            .schedule_repo
            .members_with_conflict(&roster, &window, None)
            .await?;
        if !clashing.is_empty() {
            return Err(AppError::conflict(format!(
                "{} roster member(s) already hold an overlapping booking",
                clashing.len()
            )));
        }

        let data = CreateBooking {
            code: policy::booking_code(),
            room_id: room.id,
            duration_minutes: window.duration_minutes() as i32,
            attachment_ref,
            created_by: leader,
        };
        let roster_rows: Vec<(MemberId, bool)> = roster
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i == 0))
            .collect();

        self.booking_repo
            .create_booked(&data, &roster_rows, &window)
            .await
    }

    /// Validation 6: holiday and weekday operating hours.
    async fn ensure_operating_window(&self, window: &TimeWindow) -> AppResult<()> {
        if self.calendar.is_holiday(window.date).await? {
            return Err(AppError::policy(
                "The requested date is a holiday",
            ));
        }

        let check = self
            .calendar
            .check_window(window.date.weekday(), window.start, window.end)
            .await?;
        if !check.allowed {
            return Err(AppError::policy(check.reason.unwrap_or_else(|| {
                "Outside operating hours".to_string()
            })));
        }
        Ok(())
    }

    /// Validations 8 and 9: every roster member exists, is active, is not
    /// an administrator, and is not suspended.
    async fn ensure_roster_eligible(
        &self,
        roster: &[MemberId],
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let members = self.member_repo.find_by_ids(roster).await?;
        if members.len() != roster.len() {
            return Err(AppError::not_found(
                "One or more roster members do not exist",
            ));
        }

        for member in &members {
            if !member.status.can_book() {
                return Err(AppError::eligibility(format!(
                    "Member '{}' has an inactive account",
                    member.username
                )));
            }
            if member.is_admin() {
                return Err(AppError::eligibility(format!(
                    "Administrator '{}' cannot be on a booking roster",
                    member.username
                )));
            }
        }

        for member_id in roster {
            if let Some(suspension) = self.tracker.find_block(*member_id, now).await? {
                return Err(AppError::blocked(format!(
                    "Roster member {} is blocked until {}",
                    member_id,
                    suspension.ends_at.format("%Y-%m-%d %H:%M")
                )));
            }
        }

        Ok(())
    }

    /// Moves an AKTIF booking to a new window (leader only, before any
    /// check-in, at least the cutoff margin before the current start).
    pub async fn reschedule(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
        req: RescheduleRequest,
    ) -> AppResult<BookingDetail> {
        let booking = self.load_booking(booking_id).await?;
        self.ensure_leader(&booking, ctx.member_id).await?;

        if !booking.status.is_aktif() {
            return Err(AppError::state("Only an active booking can be rescheduled"));
        }
        if self.booking_repo.count_checked_in(booking_id).await? > 0 {
            return Err(AppError::state(
                "Booking cannot be rescheduled after a member has checked in",
            ));
        }

        let schedule = self.load_schedule(booking_id).await?;
        let now_local = ctx.request_time.naive_utc();
        policy::ensure_before_cutoff(
            schedule.window().start_at(),
            now_local,
            self.policy.reschedule_cutoff_minutes,
        )?;

        let window = TimeWindow::new(req.date, req.start_time, req.end_time);
        policy::ensure_not_past(&window, now_local, self.policy.reschedule_buffer_minutes)?;
        policy::ensure_duration(&window, &self.policy)?;
        self.ensure_operating_window(&window).await?;

        self.booking_repo
            .reschedule_booked(booking_id, booking.room_id, &window, req.reason.as_deref())
            .await?;

        info!(
            booking_id = %booking_id,
            date = %window.date,
            "Booking rescheduled"
        );

        self.detail(booking_id).await
    }

    /// Cancels an AKTIF booking (leader only).
    pub async fn cancel(&self, ctx: &RequestContext, booking_id: BookingId) -> AppResult<()> {
        let booking = self.load_booking(booking_id).await?;
        self.ensure_leader(&booking, ctx.member_id).await?;

        let changed = self
            .booking_repo
            .transition_from_aktif(booking_id, BookingStatus::Dibatalkan)
            .await?;
        if !changed {
            return Err(AppError::state("Only an active booking can be cancelled"));
        }

        info!(booking_id = %booking_id, cancelled_by = %ctx.member_id, "Booking cancelled");
        Ok(())
    }

    /// Checks in one roster member (self-service, or admin-assisted).
    /// Permitted only on the scheduled date; idempotent per member.
    pub async fn check_in(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
        member_id: MemberId,
    ) -> AppResult<()> {
        if ctx.member_id != member_id && !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Members may only check in themselves",
            ));
        }

        let booking = self.load_booking(booking_id).await?;
        if !booking.status.is_aktif() {
            return Err(AppError::state("Booking is not active"));
        }

        let members = self.booking_repo.find_members(booking_id).await?;
        if !members.iter().any(|m| m.member_id == member_id) {
            return Err(AppError::not_found("Member is not on this booking's roster"));
        }

        self.ensure_on_scheduled_date(booking_id, ctx.request_time)
            .await?;

        self.booking_repo
            .check_in_member(booking_id, member_id, ctx.request_time)
            .await?;

        info!(booking_id = %booking_id, member_id = %member_id, "Member checked in");
        Ok(())
    }

    /// Checks in every roster member (admin bulk variant of the same
    /// single-member operation).
    pub async fn check_in_all(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
    ) -> AppResult<u64> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may check in a full roster",
            ));
        }

        let booking = self.load_booking(booking_id).await?;
        if !booking.status.is_aktif() {
            return Err(AppError::state("Booking is not active"));
        }

        self.ensure_on_scheduled_date(booking_id, ctx.request_time)
            .await?;

        let count = self
            .booking_repo
            .check_in_all(booking_id, ctx.request_time)
            .await?;

        info!(booking_id = %booking_id, checked_in = count, "Roster checked in");
        Ok(count)
    }

    /// Marks a booking finished ahead of the automatic pass (leader only,
    /// on the scheduled date, between start and end).
    pub async fn complete(&self, ctx: &RequestContext, booking_id: BookingId) -> AppResult<()> {
        let booking = self.load_booking(booking_id).await?;
        self.ensure_leader(&booking, ctx.member_id).await?;

        if !booking.status.is_aktif() {
            return Err(AppError::state("Booking is not active"));
        }

        let schedule = self.load_schedule(booking_id).await?;
        let now_local = ctx.request_time.naive_utc();
        let window = schedule.window();

        if now_local.date() != window.date || now_local < window.start_at() {
            return Err(AppError::state(
                "Booking can only be completed after the session has started",
            ));
        }
        if now_local >= window.end_at() {
            return Err(AppError::state(
                "Booking window has already ended",
            ));
        }

        let changed = self
            .booking_repo
            .transition_from_aktif(booking_id, BookingStatus::Selesai)
            .await?;
        if !changed {
            return Err(AppError::state("Only an active booking can be completed"));
        }

        let event = BookingEvent::Completed {
            booking_id,
            leader_id: ctx.member_id,
        };
        info!(?event, "Booking completed; handing off to feedback collaborator");

        Ok(())
    }

    /// Fetches a booking with schedule and roster. Roster members see
    /// their own bookings; admins see all.
    pub async fn get_booking(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
    ) -> AppResult<BookingDetail> {
        let detail = self.detail(booking_id).await?;
        let on_roster = detail
            .members
            .iter()
            .any(|m| m.member_id == ctx.member_id);
        if !on_roster && !ctx.is_admin() {
            return Err(AppError::eligibility(
                "You can only view bookings you are a member of",
            ));
        }
        Ok(detail)
    }

    /// Lists the caller's bookings, newest first.
    pub async fn list_bookings(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        self.booking_repo.find_by_member(ctx.member_id, &page).await
    }

    /// Lists all bookings, optionally filtered by status (admin only).
    pub async fn list_all_bookings(
        &self,
        ctx: &RequestContext,
        status: Option<BookingStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may list all bookings",
            ));
        }
        self.booking_repo.find_all(status, &page).await
    }

    // -- helpers ---------------------------------------------------------

    async fn ensure_not_blocked(&self, member_id: MemberId, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(suspension) = self.tracker.find_block(member_id, now).await? {
            return Err(AppError::blocked(format!(
                "Booking blocked until {}",
                suspension.ends_at.format("%Y-%m-%d %H:%M")
            )));
        }
        Ok(())
    }

    async fn detail(&self, booking_id: BookingId) -> AppResult<BookingDetail> {
        let booking = self.load_booking(booking_id).await?;
        let schedule = self.load_schedule(booking_id).await?;
        let members = self.booking_repo.find_members(booking_id).await?;
        Ok(BookingDetail {
            booking,
            schedule,
            members,
        })
    }

    async fn load_room(&self, room_id: RoomId) -> AppResult<Room> {
        self.room_repo
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))
    }

    async fn load_booking(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    async fn load_schedule(&self, booking_id: BookingId) -> AppResult<Schedule> {
        self.schedule_repo
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::internal("Booking has no schedule row"))
    }

    async fn ensure_leader(&self, booking: &Booking, actor: MemberId) -> AppResult<()> {
        let members = self.booking_repo.find_members(booking.id).await?;
        let is_leader = members
            .iter()
            .any(|m| m.member_id == actor && m.is_leader);
        if !is_leader {
            return Err(AppError::eligibility(
                "Only the booking's leader may perform this action",
            ));
        }
        Ok(())
    }

    async fn ensure_on_scheduled_date(
        &self,
        booking_id: BookingId,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let schedule = self.load_schedule(booking_id).await?;
        let today: NaiveDateTime = now.naive_utc();
        if today.date() != schedule.date {
            return Err(AppError::state(
                "Check-in is only possible on the scheduled date",
            ));
        }
        Ok(())
    }
}
