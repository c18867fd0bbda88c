//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookez_core::types::id::MemberId;
use bookez_entity::member::MemberRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from the identity the upstream gateway supplies
/// and passed into every service method, so each operation knows *who* is
/// acting and *when* the request arrived. There is no ambient session
/// state anywhere in the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting member's ID.
    pub member_id: MemberId,
    /// The member's role as supplied by the gateway.
    pub role: MemberRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(member_id: MemberId, role: MemberRole) -> Self {
        Self {
            member_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Creates a context with an explicit request time (tests, replays).
    pub fn at(member_id: MemberId, role: MemberRole, request_time: DateTime<Utc>) -> Self {
        Self {
            member_id,
            role,
            request_time,
        }
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
