//! Background processing for BookEZ.
//!
//! This crate provides:
//! - A cron scheduler that runs the status sweep every minute and the
//!   expired-suspension cleanup daily
//! - The job implementations the scheduler invokes
//!
//! The sweep replaces the original re-evaluate-on-page-load model; the
//! transition functions themselves are idempotent, so an ad hoc run from
//! the admin surface composes safely with the scheduled one.

pub mod jobs;
pub mod scheduler;

pub use scheduler::SweepScheduler;
