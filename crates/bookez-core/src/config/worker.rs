//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background sweep worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background sweep is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the status sweep (default: every minute).
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
    /// Cron expression for expired-suspension cleanup (default: daily 2 AM).
    #[serde(default = "default_cleanup_schedule")]
    pub cleanup_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_schedule: default_sweep_schedule(),
            cleanup_schedule: default_cleanup_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    "0 * * * * *".to_string()
}

fn default_cleanup_schedule() -> String {
    "0 0 2 * * *".to_string()
}
