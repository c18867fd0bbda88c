//! # bookez-service
//!
//! Business logic service layer for BookEZ. Each service orchestrates
//! repositories and policy to implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod booking;
pub mod calendar;
pub mod context;
pub mod room;
pub mod transition;
pub mod violation;

pub use booking::{BookingDetail, BookingService};
pub use calendar::CalendarService;
pub use context::RequestContext;
pub use room::RoomService;
pub use transition::{SweepReport, TransitionEngine};
pub use violation::ViolationTracker;
