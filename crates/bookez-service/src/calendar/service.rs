//! Database-backed operating calendar.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Weekday};
use tracing::info;

use bookez_core::error::AppError;
use bookez_core::result::AppResult;
use bookez_core::traits::calendar::{OperatingCalendar, WindowCheck};
use bookez_database::repositories::calendar::CalendarRepository;
use bookez_entity::calendar::{Holiday, OperatingHours};

use crate::context::RequestContext;

/// Operating-hours and holiday provider backed by the calendar tables,
/// plus the admin operations that maintain them.
#[derive(Debug, Clone)]
pub struct CalendarService {
    /// Calendar repository.
    calendar_repo: Arc<CalendarRepository>,
}

impl CalendarService {
    /// Creates a new calendar service.
    pub fn new(calendar_repo: Arc<CalendarRepository>) -> Self {
        Self { calendar_repo }
    }

    /// Lists the operating week (public view).
    pub async fn list_hours(&self) -> AppResult<Vec<OperatingHours>> {
        self.calendar_repo.find_all_hours().await
    }

    /// Lists all holidays (public view).
    pub async fn list_holidays(&self) -> AppResult<Vec<Holiday>> {
        self.calendar_repo.find_holidays().await
    }

    /// Sets the operating hours for a weekday (admin only).
    pub async fn set_hours(
        &self,
        ctx: &RequestContext,
        weekday: i16,
        open_time: NaiveTime,
        close_time: NaiveTime,
        active: bool,
    ) -> AppResult<OperatingHours> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may change operating hours",
            ));
        }
        if !(1..=7).contains(&weekday) {
            return Err(AppError::validation("Weekday must be between 1 and 7"));
        }
        if close_time <= open_time {
            return Err(AppError::policy("Closing time must be after opening time"));
        }

        let hours = self
            .calendar_repo
            .upsert_hours(weekday, open_time, close_time, active)
            .await?;

        info!(weekday, %open_time, %close_time, active, "Operating hours updated");
        Ok(hours)
    }

    /// Adds (or relabels) a holiday (admin only).
    pub async fn add_holiday(
        &self,
        ctx: &RequestContext,
        date: NaiveDate,
        label: &str,
    ) -> AppResult<Holiday> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may manage holidays",
            ));
        }

        let holiday = self.calendar_repo.add_holiday(date, label).await?;
        info!(%date, label, "Holiday added");
        Ok(holiday)
    }

    /// Removes a holiday (admin only).
    pub async fn remove_holiday(&self, ctx: &RequestContext, date: NaiveDate) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::eligibility(
                "Only administrators may manage holidays",
            ));
        }

        let removed = self.calendar_repo.remove_holiday(date).await?;
        if !removed {
            return Err(AppError::not_found("No holiday on that date"));
        }

        info!(%date, "Holiday removed");
        Ok(())
    }
}

#[async_trait]
impl OperatingCalendar for CalendarService {
    async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        self.calendar_repo.is_holiday(date).await
    }

    async fn check_window(
        &self,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<WindowCheck> {
        let iso = weekday.number_from_monday() as i16;
        let hours = self.calendar_repo.find_hours(iso).await?;
        Ok(evaluate_window(hours.as_ref(), start, end))
    }
}

/// Pure window evaluation against one weekday's hours.
fn evaluate_window(
    hours: Option<&OperatingHours>,
    start: NaiveTime,
    end: NaiveTime,
) -> WindowCheck {
    let Some(hours) = hours else {
        return WindowCheck::denied("Bookings are not taken on this weekday");
    };
    if !hours.active {
        return WindowCheck::denied("Bookings are not taken on this weekday");
    }
    if start < hours.open_time || end > hours.close_time {
        return WindowCheck::denied(format!(
            "Outside operating hours ({}-{})",
            hours.open_time.format("%H:%M"),
            hours.close_time.format("%H:%M")
        ));
    }
    WindowCheck::allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn hours(open: &str, close: &str, active: bool) -> OperatingHours {
        OperatingHours {
            weekday: 1,
            open_time: open.parse().unwrap(),
            close_time: close.parse().unwrap(),
            active,
            updated_at: Utc::now(),
        }
    }

    fn t(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_inside_hours_allowed() {
        let h = hours("08:00:00", "21:00:00", true);
        let check = evaluate_window(Some(&h), t("10:00:00"), t("11:00:00"));
        assert!(check.allowed);
    }

    #[test]
    fn test_window_edges_allowed() {
        let h = hours("08:00:00", "21:00:00", true);
        assert!(evaluate_window(Some(&h), t("08:00:00"), t("21:00:00")).allowed);
    }

    #[test]
    fn test_window_outside_hours_denied() {
        let h = hours("08:00:00", "21:00:00", true);
        assert!(!evaluate_window(Some(&h), t("07:30:00"), t("09:00:00")).allowed);
        assert!(!evaluate_window(Some(&h), t("20:30:00"), t("21:30:00")).allowed);
    }

    #[test]
    fn test_inactive_weekday_denied() {
        let h = hours("08:00:00", "21:00:00", false);
        let check = evaluate_window(Some(&h), t("10:00:00"), t("11:00:00"));
        assert!(!check.allowed);
    }

    #[test]
    fn test_missing_weekday_denied() {
        assert!(!evaluate_window(None, t("10:00:00"), t("11:00:00")).allowed);
    }
}
