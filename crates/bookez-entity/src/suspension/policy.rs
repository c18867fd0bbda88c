//! Escalation policy: violation count to penalty.

use chrono::Duration;

use bookez_core::config::booking::BookingPolicyConfig;

use super::model::SuspensionReason;

/// Penalty derived from a member's violation count in the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    /// Short block (counts below the threshold).
    TemporaryBlock,
    /// Longer suspension (threshold reached).
    Suspension,
}

impl Penalty {
    /// Derive the penalty for a violation count (inclusive of the newest
    /// violation). `count` is at least 1 when this is called.
    pub fn for_count(count: i64, policy: &BookingPolicyConfig) -> Self {
        if count >= policy.suspension_threshold {
            Self::Suspension
        } else {
            Self::TemporaryBlock
        }
    }

    /// How long the block lasts.
    pub fn span(&self, policy: &BookingPolicyConfig) -> Duration {
        match self {
            Self::TemporaryBlock => Duration::hours(policy.temporary_block_hours),
            Self::Suspension => Duration::days(policy.suspension_days),
        }
    }

    /// The suspension reason recorded for this penalty.
    pub fn reason(&self) -> SuspensionReason {
        match self {
            Self::TemporaryBlock => SuspensionReason::TemporaryBlock,
            Self::Suspension => SuspensionReason::RepeatedNoShow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_threshold() {
        let policy = BookingPolicyConfig::default();
        assert_eq!(Penalty::for_count(1, &policy), Penalty::TemporaryBlock);
        assert_eq!(Penalty::for_count(2, &policy), Penalty::TemporaryBlock);
        assert_eq!(Penalty::for_count(3, &policy), Penalty::Suspension);
        assert_eq!(Penalty::for_count(7, &policy), Penalty::Suspension);
    }

    #[test]
    fn test_spans() {
        let policy = BookingPolicyConfig::default();
        assert_eq!(
            Penalty::TemporaryBlock.span(&policy),
            Duration::hours(24)
        );
        assert_eq!(Penalty::Suspension.span(&policy), Duration::days(7));
    }

    #[test]
    fn test_reasons() {
        assert_eq!(
            Penalty::TemporaryBlock.reason(),
            SuspensionReason::TemporaryBlock
        );
        assert_eq!(
            Penalty::Suspension.reason(),
            SuspensionReason::RepeatedNoShow
        );
    }
}
