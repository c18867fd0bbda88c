//! Room registry: CRUD with capacity validation.

pub mod service;

pub use service::{RoomDetail, RoomService};
