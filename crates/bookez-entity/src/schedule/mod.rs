//! Schedule rows and time-window arithmetic.

pub mod model;
pub mod window;

pub use model::Schedule;
pub use window::TimeWindow;
