//! Suspension entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use bookez_core::types::id::{MemberId, SuspensionId};

/// Why a member is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "suspension_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SuspensionReason {
    /// 24-hour block after the first or second no-show in the window.
    TemporaryBlock,
    /// 7-day suspension after the third no-show in the window.
    RepeatedNoShow,
}

impl SuspensionReason {
    /// Return the reason as a stable string code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TemporaryBlock => "temporary_block",
            Self::RepeatedNoShow => "repeated_no_show",
        }
    }
}

impl fmt::Display for SuspensionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-boxed booking block for one member.
///
/// Created and refreshed only by the violation tracker, never by direct
/// user action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Suspension {
    /// Unique suspension identifier.
    pub id: SuspensionId,
    /// The blocked member.
    pub member_id: MemberId,
    /// When the block starts.
    pub starts_at: DateTime<Utc>,
    /// When the block ends.
    pub ends_at: DateTime<Utc>,
    /// Why the member is blocked.
    pub reason: SuspensionReason,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl Suspension {
    /// Whether the suspension is in force at the given instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at && now < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_active_bounds() {
        let now = Utc::now();
        let s = Suspension {
            id: SuspensionId::new(),
            member_id: MemberId::new(),
            starts_at: now,
            ends_at: now + Duration::hours(24),
            reason: SuspensionReason::TemporaryBlock,
            created_at: now,
        };
        assert!(s.is_active(now));
        assert!(s.is_active(now + Duration::hours(23)));
        assert!(!s.is_active(now + Duration::hours(24)));
        assert!(!s.is_active(now - Duration::seconds(1)));
    }
}
