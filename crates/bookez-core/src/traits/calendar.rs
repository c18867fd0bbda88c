//! Operating-hours and holiday provider trait.
//!
//! The booking orchestrator consumes operating constraints through this
//! seam; the production implementation is database-backed, tests substitute
//! a fixed calendar.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::result::AppResult;

/// Outcome of an operating-window check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCheck {
    /// Whether the requested window is allowed.
    pub allowed: bool,
    /// Stable reason string when not allowed.
    pub reason: Option<String>,
}

impl WindowCheck {
    /// An allowed window.
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denied window with a reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Read access to the university's operating constraints.
#[async_trait]
pub trait OperatingCalendar: Send + Sync {
    /// Whether the given date is a holiday.
    async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool>;

    /// Whether the requested `[start, end)` window lies within the
    /// operating hours for the given weekday.
    async fn check_window(
        &self,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<WindowCheck>;
}
