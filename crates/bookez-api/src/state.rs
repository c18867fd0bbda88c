//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use bookez_core::config::AppConfig;
use bookez_service::{BookingService, CalendarService, RoomService, ViolationTracker};
use bookez_worker::jobs::StatusSweepJob;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,
    /// Booking orchestrator.
    pub booking_service: Arc<BookingService>,
    /// Room registry.
    pub room_service: Arc<RoomService>,
    /// Operating calendar.
    pub calendar_service: Arc<CalendarService>,
    /// Violation tracker (admin views).
    pub violation_tracker: Arc<ViolationTracker>,
    /// Status sweep job, for the admin "run sweep now" endpoint.
    pub sweep_job: Arc<StatusSweepJob>,
}
