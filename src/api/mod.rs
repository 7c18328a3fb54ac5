//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the blog platform:
//! - Post endpoints (public listing, detail, counters)
//! - Admin post endpoints (save, toggle, list with hidden posts)
//! - Archive endpoints (tag cloud, monthly history)
//! - Auth endpoints (admin login/logout)

pub mod archive;
pub mod auth;
pub mod middleware;
pub mod posts;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Admin routes sit behind the session check
    let admin_routes = Router::new()
        .nest("/admin/posts", posts::admin_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_admin,
        ));

    Router::new()
        .nest("/posts", posts::public_router())
        .nest("/auth", auth::router())
        .merge(archive::router())
        .merge(admin_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .nest("/api/v1", build_api_router(state.clone()))
        .route("/health", get(health))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
