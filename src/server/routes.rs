//! Route definitions for the API server

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Creates the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer (the dashboard front end runs on its own origin)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with routes
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Reference data
        .route("/catalog/regions", get(handlers::catalog_regions))
        .route("/catalog/categories", get(handlers::catalog_categories))
        // Filtered queries
        .route("/query/records", post(handlers::query_records))
        .route("/query/summary", post(handlers::query_summary))
        .route("/query/breakdown/:dimension", post(handlers::query_breakdown))
        .route("/query/timeseries/daily", post(handlers::query_daily))
        .route("/query/timeseries/monthly", post(handlers::query_monthly))
        .route("/query/dashboard", post(handlers::query_dashboard))
        // Store lifecycle
        .route("/init", post(handlers::run_init))
        // Exports
        .route("/export/records", post(handlers::export_records))
        .route("/export/report", post(handlers::export_report))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
