//! Route definitions for the BookEZ HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(room_routes())
        .merge(booking_routes())
        .merge(calendar_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Room browse endpoints
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::room::list_rooms))
        .route("/rooms/{id}", get(handlers::room::get_room))
}

/// Booking lifecycle endpoints
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings", get(handlers::booking::list_bookings))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/reschedule",
            put(handlers::booking::reschedule),
        )
        .route("/bookings/{id}/cancel", post(handlers::booking::cancel))
        .route("/bookings/{id}/check-in", post(handlers::booking::check_in))
        .route("/bookings/{id}/complete", post(handlers::booking::complete))
}

/// Public operating-calendar view
fn calendar_routes() -> Router<AppState> {
    Router::new().route("/calendar", get(handlers::admin::calendar::get_calendar))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Room management
        .route("/admin/rooms", post(handlers::admin::rooms::create_room))
        .route(
            "/admin/rooms/{id}",
            put(handlers::admin::rooms::update_room),
        )
        .route(
            "/admin/rooms/{id}",
            delete(handlers::admin::rooms::delete_room),
        )
        // Booking oversight
        .route(
            "/admin/bookings",
            get(handlers::admin::bookings::list_bookings),
        )
        .route(
            "/admin/bookings/external",
            post(handlers::admin::bookings::create_external_booking),
        )
        .route(
            "/admin/bookings/{id}/check-in/{member_id}",
            post(handlers::admin::bookings::check_in_member),
        )
        .route(
            "/admin/bookings/{id}/check-in-all",
            post(handlers::admin::bookings::check_in_all),
        )
        .route("/admin/sweep", post(handlers::admin::bookings::run_sweep))
        // Suspensions
        .route(
            "/admin/suspensions",
            get(handlers::admin::suspensions::list_suspensions),
        )
        .route(
            "/admin/violations",
            get(handlers::admin::suspensions::list_violations),
        )
        // Operating calendar
        .route(
            "/admin/calendar/hours/{weekday}",
            put(handlers::admin::calendar::set_hours),
        )
        .route(
            "/admin/calendar/holidays",
            post(handlers::admin::calendar::add_holiday),
        )
        .route(
            "/admin/calendar/holidays/{date}",
            delete(handlers::admin::calendar::remove_holiday),
        )
}

/// Health check endpoints (no identity required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
