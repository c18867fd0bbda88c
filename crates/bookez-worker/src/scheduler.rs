//! Cron scheduler for the periodic sweep and maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use bookez_core::config::WorkerConfig;
use bookez_core::error::AppError;

use crate::jobs::{StatusSweepJob, SuspensionCleanupJob};

/// Cron-based scheduler for the background sweep and cleanup tasks.
pub struct SweepScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Worker configuration (cron expressions).
    config: WorkerConfig,
    /// Status sweep job.
    sweep: Arc<StatusSweepJob>,
    /// Suspension cleanup job.
    cleanup: Arc<SuspensionCleanupJob>,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler").finish()
    }
}

impl SweepScheduler {
    /// Create a new scheduler.
    pub async fn new(
        config: WorkerConfig,
        sweep: Arc<StatusSweepJob>,
        cleanup: Arc<SuspensionCleanupJob>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            config,
            sweep,
            cleanup,
        })
    }

    /// Register all scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_status_sweep().await?;
        self.register_suspension_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Sweep scheduler started");
        Ok(())
    }

    /// Shut down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }

    /// Status sweep — every minute by default.
    async fn register_status_sweep(&self) -> Result<(), AppError> {
        let sweep = Arc::clone(&self.sweep);
        let job = CronJob::new_async(self.config.sweep_schedule.as_str(), move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                if let Err(e) = sweep.run().await {
                    tracing::error!("Status sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create sweep schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {e}")))?;

        tracing::info!(
            "Registered: status_sweep ({})",
            self.config.sweep_schedule
        );
        Ok(())
    }

    /// Expired-suspension cleanup — daily at 2 AM by default.
    async fn register_suspension_cleanup(&self) -> Result<(), AppError> {
        let cleanup = Arc::clone(&self.cleanup);
        let job = CronJob::new_async(
            self.config.cleanup_schedule.as_str(),
            move |_uuid, _lock| {
                let cleanup = Arc::clone(&cleanup);
                Box::pin(async move {
                    if let Err(e) = cleanup.run().await {
                        tracing::error!("Suspension cleanup failed: {}", e);
                    }
                })
            },
        )
        .map_err(|e| AppError::internal(format!("Failed to create cleanup schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add cleanup schedule: {e}")))?;

        tracing::info!(
            "Registered: suspension_cleanup ({})",
            self.config.cleanup_schedule
        );
        Ok(())
    }
}
