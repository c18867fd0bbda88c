//! Member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookez_core::types::id::MemberId;

use super::role::MemberRole;
use super::status::MemberStatus;

/// A registered member account, as the booking core sees it.
///
/// Credentials, sessions, and profile management live with the external
/// identity collaborator; the core reads role and status for roster
/// eligibility checks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Member role.
    pub role: MemberRole,
    /// Account status.
    pub status: MemberStatus,
    /// When the member was created.
    pub created_at: DateTime<Utc>,
    /// When the member was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Check if this member has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
