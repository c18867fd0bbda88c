//! Expired-suspension cleanup job.

use std::sync::Arc;

use chrono::Utc;
use tracing;

use bookez_core::result::AppResult;
use bookez_service::ViolationTracker;

/// Purges suspension rows that have expired.
///
/// Expired rows no longer block anyone (every check compares against
/// `ends_at`); this just keeps the table from growing without bound.
#[derive(Clone)]
pub struct SuspensionCleanupJob {
    /// Violation tracker.
    tracker: Arc<ViolationTracker>,
}

impl SuspensionCleanupJob {
    /// Create a new cleanup job.
    pub fn new(tracker: Arc<ViolationTracker>) -> Self {
        Self { tracker }
    }

    /// Delete suspensions that have already ended.
    pub async fn run(&self) -> AppResult<u64> {
        let count = self.tracker.cleanup_expired(Utc::now()).await?;
        tracing::info!("Cleaned up {} expired suspensions", count);
        Ok(count)
    }
}
