//! Admin-only handlers.

pub mod bookings;
pub mod calendar;
pub mod rooms;
pub mod suspensions;
