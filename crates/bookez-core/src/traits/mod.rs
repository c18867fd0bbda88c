//! Provider traits implemented by infrastructure crates.

pub mod calendar;

pub use calendar::{OperatingCalendar, WindowCheck};
