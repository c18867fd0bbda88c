//! Caller identity extractor.
//!
//! Identity is established by the upstream gateway, which terminates the
//! session and forwards the member ID and role as trusted headers. The
//! extractor turns them into the request-scoped [`RequestContext`] every
//! service call takes; the core never reads ambient session state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bookez_core::error::AppError;
use bookez_core::types::id::MemberId;
use bookez_entity::member::MemberRole;
use bookez_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated member's ID.
const MEMBER_ID_HEADER: &str = "x-member-id";
/// Header carrying the authenticated member's role.
const MEMBER_ROLE_HEADER: &str = "x-member-role";

/// The authenticated caller, extracted from gateway headers.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl Identity {
    /// The request context for service calls.
    pub fn ctx(&self) -> &RequestContext {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let member_id = header_value(parts, MEMBER_ID_HEADER)?
            .parse::<MemberId>()
            .map_err(|_| ApiError::from(AppError::validation("Invalid member ID header")))?;

        let role = header_value(parts, MEMBER_ROLE_HEADER)?
            .parse::<MemberRole>()
            .map_err(|_| ApiError::from(AppError::validation("Invalid member role header")))?;

        Ok(Self(RequestContext::new(member_id, role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::from(AppError::validation(format!("Missing '{name}' header"))))
}
