//! BookEZ Server — university room-booking service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use bookez_core::config::AppConfig;
use bookez_core::error::AppError;
use bookez_database::DatabasePool;
use bookez_database::repositories::booking::BookingRepository;
use bookez_database::repositories::calendar::CalendarRepository;
use bookez_database::repositories::member::MemberRepository;
use bookez_database::repositories::room::RoomRepository;
use bookez_database::repositories::schedule::ScheduleRepository;
use bookez_database::repositories::suspension::SuspensionRepository;
use bookez_service::{
    BookingService, CalendarService, RoomService, TransitionEngine, ViolationTracker,
};
use bookez_worker::SweepScheduler;
use bookez_worker::jobs::{StatusSweepJob, SuspensionCleanupJob};

#[tokio::main]
async fn main() {
    let env = std::env::var("BOOKEZ_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BookEZ v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    bookez_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
    let schedule_repo = Arc::new(ScheduleRepository::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepository::new(db_pool.clone()));
    let member_repo = Arc::new(MemberRepository::new(db_pool.clone()));
    let suspension_repo = Arc::new(SuspensionRepository::new(db_pool.clone()));
    let calendar_repo = Arc::new(CalendarRepository::new(db_pool.clone()));

    // ── Services ─────────────────────────────────────────────────
    let tracker = Arc::new(ViolationTracker::new(
        Arc::clone(&suspension_repo),
        config.booking.clone(),
    ));
    let calendar_service = Arc::new(CalendarService::new(Arc::clone(&calendar_repo)));
    let room_service = Arc::new(RoomService::new(
        Arc::clone(&room_repo),
        Arc::clone(&schedule_repo),
    ));
    let booking_service = Arc::new(BookingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&schedule_repo),
        Arc::clone(&room_repo),
        Arc::clone(&member_repo),
        Arc::clone(&tracker),
        calendar_service.clone(),
        config.booking.clone(),
    ));
    let engine = Arc::new(TransitionEngine::new(
        Arc::clone(&booking_repo),
        Arc::clone(&room_repo),
        config.booking.clone(),
    ));

    // ── Background sweep ─────────────────────────────────────────
    let sweep_job = Arc::new(StatusSweepJob::new(
        Arc::clone(&engine),
        Arc::clone(&tracker),
    ));
    let cleanup_job = Arc::new(SuspensionCleanupJob::new(Arc::clone(&tracker)));

    let mut scheduler = if config.worker.enabled {
        let scheduler = SweepScheduler::new(
            config.worker.clone(),
            Arc::clone(&sweep_job),
            Arc::clone(&cleanup_job),
        )
        .await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Background sweep disabled by configuration");
        None
    };

    // ── HTTP server ──────────────────────────────────────────────
    let state = bookez_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        booking_service,
        room_service,
        calendar_service,
        violation_tracker: tracker,
        sweep_job,
    };

    let router = bookez_api::router::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("BookEZ listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("BookEZ shut down");
    Ok(())
}

/// Resolve when SIGINT/SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
