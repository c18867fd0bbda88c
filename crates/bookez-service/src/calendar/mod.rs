//! Operating calendar: database-backed hours/holiday provider.

pub mod service;

pub use service::CalendarService;
