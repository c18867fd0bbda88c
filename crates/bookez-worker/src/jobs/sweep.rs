//! Status sweep job: transition passes plus violation bookkeeping.

use std::sync::Arc;

use chrono::Utc;
use tracing;

use bookez_core::result::AppResult;
use bookez_service::transition::SweepReport;
use bookez_service::{TransitionEngine, ViolationTracker};

/// Runs the transition engine and feeds its events to the violation
/// tracker.
///
/// The engine emits `NoShow` events rather than writing suspension rows
/// itself; this job is the place where the two meet.
#[derive(Clone)]
pub struct StatusSweepJob {
    /// Transition engine.
    engine: Arc<TransitionEngine>,
    /// Violation tracker.
    tracker: Arc<ViolationTracker>,
}

impl StatusSweepJob {
    /// Create a new sweep job.
    pub fn new(engine: Arc<TransitionEngine>, tracker: Arc<ViolationTracker>) -> Self {
        Self { engine, tracker }
    }

    /// Run one sweep now and apply its events.
    pub async fn run(&self) -> AppResult<SweepReport> {
        tracing::debug!("Running status sweep");

        let now = Utc::now();
        let report = self.engine.run_sweep(now).await?;

        for event in &report.events {
            self.tracker.apply(event).await?;
        }

        Ok(report)
    }
}
