//! Recorded no-show violation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::{BookingId, MemberId, ViolationId};

/// One HANGUS event attributed to one roster member.
///
/// Written only when the transition engine forfeits a booking; the
/// suspension tracker counts these rows over the rolling window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Violation {
    /// Unique violation identifier.
    pub id: ViolationId,
    /// The member the no-show is attributed to.
    pub member_id: MemberId,
    /// The forfeited booking.
    pub booking_id: BookingId,
    /// When the booking transitioned to HANGUS.
    pub occurred_at: DateTime<Utc>,
}
