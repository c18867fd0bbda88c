//! No-show violation tracking and suspension derivation.

pub mod tracker;

pub use tracker::ViolationTracker;
