//! Post API endpoints
//!
//! Handles HTTP requests for post management:
//! - GET /api/v1/posts - List published posts with filters and pagination
//! - GET /api/v1/posts/{urlId} - Get a published post by slug
//! - POST /api/v1/posts/{id}/views - Count a view
//! - POST /api/v1/posts/{id}/like - Toggle the viewer's like
//! - GET /api/v1/admin/posts - List all posts, hidden included
//! - GET /api/v1/admin/posts/{id} - Get any post by ID
//! - POST /api/v1/admin/posts - Create or update a post
//! - POST /api/v1/admin/posts/{id}/toggle - Flip a post's visibility

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{extract_viewer_ip, ApiError, AppState};
use crate::models::{LikeToggle, Post, PostPage, PostQuery, SavePostInput, SortKey};
use crate::services::PostServiceError;

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Text search over title and content
    pub content: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
    /// On-or-after date filter, DDMMYYYY
    pub date: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Response for a single post with rendered content
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: Post,
    pub content_html: String,
}

/// Response for the view counter
#[derive(Debug, Serialize)]
pub struct ViewCountResponse {
    pub views: i64,
}

/// Build the public posts router (read + counters)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/{url_id}", get(get_post))
        .route("/{id}/views", post(record_view))
        .route("/{id}/like", post(toggle_like))
}

/// Build the admin posts router (full access)
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_posts))
        .route("/", post(save_post))
        .route("/{id}", get(get_post_by_id))
        .route("/{id}/toggle", post(toggle_visibility))
}

fn apply_filters(params: ListPostsQuery, base: PostQuery) -> PostQuery {
    let mut query = base.with_page(params.page).with_limit(params.limit);

    if let Some(content) = params.content {
        query = query.with_text(content);
    }
    if let Some(tag) = params.tag {
        query = query.with_tag(tag);
    }
    if let Some(category) = params.category {
        query = query.with_category(category);
    }
    if let Some(date) = params.date {
        query = query.with_date(date);
    }
    // Unrecognized sort values fall back to newest-first
    if let Some(sort) = params.sort.as_deref().and_then(SortKey::from_str) {
        query = query.with_sort(sort);
    }

    query
}

fn map_service_error(e: PostServiceError) -> ApiError {
    match e {
        PostServiceError::NotFound(msg) => ApiError::not_found(msg),
        PostServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        PostServiceError::DuplicateUrlId(slug) => {
            ApiError::conflict(format!("Post slug already exists: {}", slug))
        }
        PostServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
    }
}

/// GET /api/v1/posts - List published posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> Json<PostPage> {
    let query = apply_filters(params, PostQuery::public());
    Json(state.post_service.list_posts(&query).await)
}

/// GET /api/v1/posts/{urlId} - Get a published post by slug
///
/// Hidden posts answer 404 so their existence does not leak.
pub async fn get_post(
    State(state): State<AppState>,
    Path(url_id): Path<String>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = state
        .post_service
        .get_post(&url_id)
        .await
        .map_err(map_service_error)?
        .filter(|post| post.active)
        .ok_or_else(|| ApiError::not_found(format!("Post not found: {}", url_id)))?;

    let content_html = state.post_service.render_markdown(&post.content);

    Ok(Json(PostDetailResponse { post, content_html }))
}

/// POST /api/v1/posts/{id}/views - Count a view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ViewCountResponse>, ApiError> {
    let views = state
        .post_service
        .increment_views(id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(ViewCountResponse { views }))
}

/// POST /api/v1/posts/{id}/like - Toggle the viewer's like
///
/// The viewer is identified by IP, so a second call from the same address
/// undoes the first.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<LikeToggle>, ApiError> {
    let viewer_ip = extract_viewer_ip(&headers);

    let toggle = state
        .post_service
        .toggle_like(id, &viewer_ip)
        .await
        .map_err(map_service_error)?;

    Ok(Json(toggle))
}

/// GET /api/v1/admin/posts - List all posts, hidden included
pub async fn list_all_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> Json<PostPage> {
    let query = apply_filters(params, PostQuery::admin());
    Json(state.post_service.list_posts(&query).await)
}

/// GET /api/v1/admin/posts/{id} - Get any post by ID for editing
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .post_service
        .get_post_by_id(id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::not_found(format!("Post not found: {}", id)))?;

    Ok(Json(post))
}

/// POST /api/v1/admin/posts - Create or update a post
///
/// A body with `id: 0` creates; any other id updates. Creation answers 201.
pub async fn save_post(
    State(state): State<AppState>,
    Json(body): Json<SavePostInput>,
) -> Result<impl IntoResponse, ApiError> {
    let creating = body.is_create();

    let post = state
        .post_service
        .save_post(body)
        .await
        .map_err(map_service_error)?;

    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(post)))
}

/// POST /api/v1/admin/posts/{id}/toggle - Flip a post's visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .post_service
        .toggle_active(id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(post))
}
