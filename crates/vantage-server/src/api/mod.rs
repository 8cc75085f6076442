pub mod analyses;
pub mod analyze;
pub mod health;
pub mod refactor;
pub mod stats;
pub mod upload;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Assembles the full HTTP surface and layers the teacher's middleware
/// stack over it: tracing, response compression, a hard request timeout,
/// and a permissive CORS policy — there is no browser-facing origin to
/// restrict in this deployment.
pub fn build_router(state: Arc<AppState>) -> Router {
    let timeout_seconds = state.config.server.request_timeout_seconds;

    Router::new()
        .route("/health", get(health::health))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/upload", post(upload::upload))
        .route("/api/analysis/:id", get(analyses::get_analysis))
        .route("/api/analyses", get(analyses::list_analyses))
        .route("/api/refactor/apply", post(refactor::apply_refactoring))
        .route("/api/stats", get(stats::stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
