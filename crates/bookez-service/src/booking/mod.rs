//! Booking orchestration: validation pipeline and lifecycle operations.

pub mod orchestrator;
pub mod policy;

pub use orchestrator::{
    BookingDetail, BookingService, CreateBookingRequest, RescheduleRequest,
};
