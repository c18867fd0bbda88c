//! Booking lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{BookingId, MemberId, RoomId};

/// Events emitted by the transition engine and the orchestrator's
/// completion path.
///
/// `NoShow` is the engine-to-tracker handoff: the engine never writes
/// violation or suspension rows itself. `Completed` is handed to the
/// external feedback collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookingEvent {
    /// The leader marked the booking finished (SELESAI). The external
    /// feedback collaborator is invited off the back of this event.
    Completed {
        /// The booking ID.
        booking_id: BookingId,
        /// The leader who completed it.
        leader_id: MemberId,
    },
    /// The sweep closed out a booking whose window passed with at least
    /// one check-in (SELESAI).
    AutoCompleted {
        /// The booking ID.
        booking_id: BookingId,
    },
    /// The sweep forfeited a booking for no-show (HANGUS). Carries the
    /// full roster so the violation tracker can attribute the no-show to
    /// every member.
    NoShow {
        /// The booking ID.
        booking_id: BookingId,
        /// The forfeited room.
        room_id: RoomId,
        /// Every roster member (leader included).
        member_ids: Vec<MemberId>,
        /// When the transition was applied.
        occurred_at: DateTime<Utc>,
    },
}
