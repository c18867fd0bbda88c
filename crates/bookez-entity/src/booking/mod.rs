//! Booking aggregate: header plus member roster.

pub mod member;
pub mod model;
pub mod status;

pub use member::BookingMember;
pub use model::{Booking, CreateBooking};
pub use status::BookingStatus;
