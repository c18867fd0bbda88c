//! Domain events emitted by BookEZ operations.
//!
//! Events are returned by the orchestrator and the transition engine and
//! consumed by the violation tracker and the (external) notification
//! collaborator. The transition engine never applies violation side effects
//! directly; it only emits events.

pub mod booking;

pub use booking::BookingEvent;
