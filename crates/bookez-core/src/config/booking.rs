//! Booking policy configuration.
//!
//! Every time-based rule in the booking lifecycle is a knob here so that
//! deployments can tune grace windows without code changes. The defaults
//! match the university's standing policy.

use serde::{Deserialize, Serialize};

/// Booking lifecycle policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPolicyConfig {
    /// Minutes after the scheduled start before a booking with zero
    /// check-ins is forfeited (HANGUS).
    #[serde(default = "default_no_show_grace")]
    pub no_show_grace_minutes: i64,
    /// Minimum booking duration in minutes. Must exceed the no-show grace
    /// window, otherwise a booking could be forfeited after it ended.
    #[serde(default = "default_min_duration")]
    pub min_duration_minutes: i64,
    /// How far in the past a new booking's start may lie (0 = must not be
    /// in the past at all).
    #[serde(default)]
    pub create_buffer_minutes: i64,
    /// Past-buffer applied when rescheduling to a new start time.
    #[serde(default = "default_reschedule_buffer")]
    pub reschedule_buffer_minutes: i64,
    /// Minimum minutes before the existing start time at which a
    /// reschedule is still permitted.
    #[serde(default = "default_reschedule_cutoff")]
    pub reschedule_cutoff_minutes: i64,
    /// Rolling window, in days, over which no-show violations are counted.
    #[serde(default = "default_violation_window")]
    pub violation_window_days: i64,
    /// Duration of the temporary block for 1-2 violations, in hours.
    #[serde(default = "default_block_hours")]
    pub temporary_block_hours: i64,
    /// Duration of the repeat-offender suspension, in days.
    #[serde(default = "default_suspension_days")]
    pub suspension_days: i64,
    /// Violation count at which the longer suspension kicks in.
    #[serde(default = "default_suspension_threshold")]
    pub suspension_threshold: i64,
}

impl Default for BookingPolicyConfig {
    fn default() -> Self {
        Self {
            no_show_grace_minutes: default_no_show_grace(),
            min_duration_minutes: default_min_duration(),
            create_buffer_minutes: 0,
            reschedule_buffer_minutes: default_reschedule_buffer(),
            reschedule_cutoff_minutes: default_reschedule_cutoff(),
            violation_window_days: default_violation_window(),
            temporary_block_hours: default_block_hours(),
            suspension_days: default_suspension_days(),
            suspension_threshold: default_suspension_threshold(),
        }
    }
}

fn default_no_show_grace() -> i64 {
    10
}

fn default_min_duration() -> i64 {
    15
}

fn default_reschedule_buffer() -> i64 {
    5
}

fn default_reschedule_cutoff() -> i64 {
    60
}

fn default_violation_window() -> i64 {
    30
}

fn default_block_hours() -> i64 {
    24
}

fn default_suspension_days() -> i64 {
    7
}

fn default_suspension_threshold() -> i64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let cfg = BookingPolicyConfig::default();
        assert_eq!(cfg.no_show_grace_minutes, 10);
        assert_eq!(cfg.min_duration_minutes, 15);
        assert_eq!(cfg.create_buffer_minutes, 0);
        assert_eq!(cfg.reschedule_buffer_minutes, 5);
        assert_eq!(cfg.reschedule_cutoff_minutes, 60);
        assert_eq!(cfg.violation_window_days, 30);
        assert_eq!(cfg.temporary_block_hours, 24);
        assert_eq!(cfg.suspension_days, 7);
        assert_eq!(cfg.suspension_threshold, 3);
    }

    #[test]
    fn test_min_duration_exceeds_grace() {
        let cfg = BookingPolicyConfig::default();
        assert!(cfg.min_duration_minutes > cfg.no_show_grace_minutes);
    }
}
