//! Operating-hours and holiday rows.

pub mod model;

pub use model::{Holiday, OperatingHours};
