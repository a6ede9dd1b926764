//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Dataset upload and listing
        .route("/datasets", get(handlers::list_datasets))
        .route("/datasets", post(handlers::upload_dataset))
        // Visualization endpoints
        .route("/datasets/{dataset_id}/records", get(handlers::get_records))
        .route("/datasets/{dataset_id}/rooms", get(handlers::get_room_summaries))
        .route("/datasets/{dataset_id}/heatmap", get(handlers::get_heatmap))
        .route(
            "/datasets/{dataset_id}/rooms/{room_id}/timeseries",
            get(handlers::get_timeseries),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Allow large CSV payloads during uploads.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
