//! Scheduled job implementations.

pub mod cleanup;
pub mod sweep;

pub use cleanup::SuspensionCleanupJob;
pub use sweep::StatusSweepJob;
