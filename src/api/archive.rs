//! Archive API endpoints
//!
//! Sidebar rollups over the published posts:
//! - GET /api/v1/tags - Tag cloud with per-tag counts
//! - GET /api/v1/history - Monthly post counts, newest first
//!
//! Both answer an empty list when the snapshot cannot be loaded.

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::AppState;
use crate::services::{self, MonthCount, TagCount};

/// Build the archive router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tag_cloud))
        .route("/history", get(history))
}

/// GET /api/v1/tags - Tag cloud over published posts
pub async fn tag_cloud(State(state): State<AppState>) -> Json<Vec<TagCount>> {
    let posts = state.post_service.all_posts().await;
    Json(services::tag_cloud(&posts))
}

/// GET /api/v1/history - Monthly post counts
pub async fn history(State(state): State<AppState>) -> Json<Vec<MonthCount>> {
    let posts = state.post_service.all_posts().await;
    Json(services::history(&posts))
}
