//! Time-window value type and overlap arithmetic.
//!
//! All conflict detection in the booking core reduces to the predicates on
//! this type, so they are kept pure and exhaustively tested here.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` window on a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// The calendar date.
    pub date: NaiveDate,
    /// Start time (inclusive).
    pub start: NaiveTime,
    /// End time (exclusive).
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Create a new window. Callers validate `end > start` separately.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether this window overlaps another. Any overlap counts, not just
    /// containment; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }

    /// The window's start as a full timestamp.
    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// The window's end as a full timestamp.
    pub fn end_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// Whether the given instant falls inside the window.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start_at() && at < self.end_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(date: &str, start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(
            date.parse().unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
    }

    #[test]
    fn test_partial_overlap() {
        let a = window("2025-06-01", "10:00:00", "10:20:00");
        let b = window("2025-06-01", "10:10:00", "10:30:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let outer = window("2025-06-01", "09:00:00", "12:00:00");
        let inner = window("2025-06-01", "10:00:00", "10:30:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let a = window("2025-06-01", "10:00:00", "10:20:00");
        let b = window("2025-06-01", "10:20:00", "10:40:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_different_dates_never_overlap() {
        let a = window("2025-06-01", "10:00:00", "11:00:00");
        let b = window("2025-06-02", "10:00:00", "11:00:00");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_duration_minutes() {
        let w = window("2025-06-01", "10:00:00", "10:20:00");
        assert_eq!(w.duration_minutes(), 20);
    }

    #[test]
    fn test_contains_is_half_open() {
        let w = window("2025-06-01", "10:00:00", "10:20:00");
        assert!(w.contains("2025-06-01T10:00:00".parse().unwrap()));
        assert!(w.contains("2025-06-01T10:19:59".parse().unwrap()));
        assert!(!w.contains("2025-06-01T10:20:00".parse().unwrap()));
        assert!(!w.contains("2025-06-01T09:59:59".parse().unwrap()));
    }
}
