//! Violation tracker: converts repeated no-shows into escalating blocks.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use bookez_core::config::booking::BookingPolicyConfig;
use bookez_core::error::AppError;
use bookez_core::events::BookingEvent;
use bookez_core::result::AppResult;
use bookez_core::types::id::{BookingId, MemberId};
use bookez_core::types::pagination::{PageRequest, PageResponse};
use bookez_database::repositories::suspension::SuspensionRepository;
use bookez_entity::suspension::{Penalty, Suspension, Violation};

use crate::context::RequestContext;

/// Records no-show violations and derives suspensions from them.
///
/// Consumes the transition engine's `NoShow` events; the engine itself
/// never touches violation or suspension rows, which keeps the two
/// independently testable.
#[derive(Debug, Clone)]
pub struct ViolationTracker {
    /// Suspension repository.
    suspension_repo: Arc<SuspensionRepository>,
    /// Policy knobs.
    policy: BookingPolicyConfig,
}

impl ViolationTracker {
    /// Creates a new violation tracker.
    pub fn new(suspension_repo: Arc<SuspensionRepository>, policy: BookingPolicyConfig) -> Self {
        Self {
            suspension_repo,
            policy,
        }
    }

    /// Applies a transition-engine event. Only `NoShow` events carry
    /// work; everything else is ignored. Returns the number of members
    /// whose suspension was created or refreshed.
    pub async fn apply(&self, event: &BookingEvent) -> AppResult<usize> {
        let BookingEvent::NoShow {
            booking_id,
            member_ids,
            occurred_at,
            ..
        } = event
        else {
            return Ok(0);
        };

        for member_id in member_ids {
            self.record_no_show(*member_id, *booking_id, *occurred_at)
                .await?;
        }
        Ok(member_ids.len())
    }

    /// Records one no-show for one member and creates or refreshes the
    /// derived suspension. The count includes the new violation; 1-2
    /// violations in the rolling window yield the temporary block, the
    /// threshold and above yield the longer suspension.
    pub async fn record_no_show(
        &self,
        member_id: MemberId,
        booking_id: BookingId,
        occurred_at: DateTime<Utc>,
    ) -> AppResult<Suspension> {
        self.suspension_repo
            .record_violation(member_id, booking_id, occurred_at)
            .await?;

        let window_start = occurred_at - Duration::days(self.policy.violation_window_days);
        let count = self
            .suspension_repo
            .count_violations_since(member_id, window_start)
            .await?;

        let penalty = Penalty::for_count(count, &self.policy);
        let ends_at = occurred_at + penalty.span(&self.policy);
        let suspension = self
            .suspension_repo
            .upsert(member_id, occurred_at, ends_at, penalty.reason())
            .await?;

        info!(
            member_id = %member_id,
            booking_id = %booking_id,
            violations_in_window = count,
            reason = %suspension.reason,
            ends_at = %suspension.ends_at,
            "No-show recorded"
        );

        Ok(suspension)
    }

    /// The member's unexpired suspension, if any. Used by the
    /// orchestrator's suspension validations.
    pub async fn find_block(
        &self,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Suspension>> {
        self.suspension_repo
            .find_active_for_member(member_id, now)
            .await
    }

    /// Lists unexpired suspensions (admin view).
    pub async fn list_suspensions(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Suspension>> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may list suspensions",
            ));
        }
        self.suspension_repo
            .find_all_active(ctx.request_time, &page)
            .await
    }

    /// Lists recorded violations (admin view).
    pub async fn list_violations(
        &self,
        ctx: &RequestContext,
        member_id: Option<MemberId>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Violation>> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may list violations",
            ));
        }
        self.suspension_repo.find_violations(member_id, &page).await
    }

    /// Deletes suspensions that expired before the cutoff (worker job).
    pub async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        self.suspension_repo.cleanup_expired(before).await
    }
}
