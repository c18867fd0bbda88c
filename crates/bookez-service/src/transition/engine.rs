//! Status transition engine.
//!
//! Keeps booking and room status consistent with wall-clock time. Each
//! pass is a single guarded UPDATE, so re-running on unchanged state is a
//! no-op. The no-show pass MUST run before the completion pass: a booking
//! with zero check-ins whose end has also passed must become HANGUS, not
//! SELESAI, and the completion pass's check-in precondition only excludes
//! it once the no-show pass has already flagged it.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::info;

use bookez_core::config::booking::BookingPolicyConfig;
use bookez_core::events::BookingEvent;
use bookez_core::result::AppResult;
use bookez_database::repositories::booking::BookingRepository;
use bookez_database::repositories::room::RoomRepository;

/// Outcome of one sweep run.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Bookings forfeited for no-show this run.
    pub forfeited: usize,
    /// Bookings auto-completed this run.
    pub completed: usize,
    /// Rooms whose availability flag changed this run.
    pub rooms_updated: u64,
    /// The events emitted by the run, in emission order.
    #[serde(skip)]
    pub events: Vec<BookingEvent>,
}

/// Scans bookings and applies wall-clock-driven status transitions.
///
/// The engine only moves statuses and recomputes availability; no-show
/// side effects travel as [`BookingEvent::NoShow`] events for the
/// violation tracker to consume.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Policy knobs.
    policy: BookingPolicyConfig,
}

impl TransitionEngine {
    /// Creates a new transition engine.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        room_repo: Arc<RoomRepository>,
        policy: BookingPolicyConfig,
    ) -> Self {
        Self {
            booking_repo,
            room_repo,
            policy,
        }
    }

    /// Forfeits AKTIF bookings whose start is more than the grace window
    /// in the past with zero checked-in members. Emits one `NoShow` event
    /// per forfeited booking.
    pub async fn apply_no_show_transitions(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingEvent>> {
        let cutoff = no_show_cutoff(now, self.policy.no_show_grace_minutes);
        let forfeited = self.booking_repo.forfeit_no_shows(cutoff).await?;

        let mut events = Vec::with_capacity(forfeited.len());
        for (booking_id, room_id) in forfeited {
            let members = self.booking_repo.find_members(booking_id).await?;
            let member_ids = members.iter().map(|m| m.member_id).collect();

            info!(booking_id = %booking_id, "Booking forfeited for no-show");
            events.push(BookingEvent::NoShow {
                booking_id,
                room_id,
                member_ids,
                occurred_at: now,
            });
        }

        Ok(events)
    }

    /// Closes out AKTIF bookings whose end has passed with at least one
    /// checked-in member.
    pub async fn apply_completion_transitions(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingEvent>> {
        let completed = self
            .booking_repo
            .complete_attended(now.naive_utc())
            .await?;

        let events = completed
            .into_iter()
            .map(|booking_id| {
                info!(booking_id = %booking_id, "Booking auto-completed");
                BookingEvent::AutoCompleted { booking_id }
            })
            .collect();

        Ok(events)
    }

    /// Recomputes every room's availability flag for the given instant.
    pub async fn recompute_room_availability(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let local = now.naive_utc();
        self.room_repo
            .recompute_availability(local.date(), local.time())
            .await
    }

    /// Runs the full sweep: no-show pass, then completion pass, then the
    /// room-availability recompute. The order is load-bearing.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        let mut events = self.apply_no_show_transitions(now).await?;
        let forfeited = events.len();

        let completed_events = self.apply_completion_transitions(now).await?;
        let completed = completed_events.len();
        events.extend(completed_events);

        let rooms_updated = self.recompute_room_availability(now).await?;

        if forfeited > 0 || completed > 0 || rooms_updated > 0 {
            info!(forfeited, completed, rooms_updated, "Status sweep applied changes");
        }

        Ok(SweepReport {
            forfeited,
            completed,
            rooms_updated,
            events,
        })
    }
}

/// The start-time cutoff for the no-show pass. A booking is forfeited
/// only when its start is strictly before this instant, i.e. more than
/// the full grace window in the past.
fn no_show_cutoff(now: DateTime<Utc>, grace_minutes: i64) -> NaiveDateTime {
    now.naive_utc() - Duration::minutes(grace_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().expect("timestamp")
    }

    #[test]
    fn test_booking_forfeited_after_grace() {
        // Booking starts 10:00; at 10:11 it is more than 10 minutes late.
        let start: NaiveDateTime = "2025-06-01T10:00:00".parse().unwrap();
        let cutoff = no_show_cutoff(utc("2025-06-01T10:11:00Z"), 10);
        assert!(start < cutoff);
    }

    #[test]
    fn test_booking_kept_within_grace() {
        // At exactly start + 10 minutes the grace window has not yet been
        // exceeded.
        let start: NaiveDateTime = "2025-06-01T10:00:00".parse().unwrap();
        let cutoff = no_show_cutoff(utc("2025-06-01T10:10:00Z"), 10);
        assert!(start >= cutoff);

        let cutoff = no_show_cutoff(utc("2025-06-01T10:05:00Z"), 10);
        assert!(start >= cutoff);
    }
}
