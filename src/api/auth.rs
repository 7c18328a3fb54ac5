//! Authentication API endpoints
//!
//! Handles HTTP requests for admin authentication:
//! - POST /api/v1/auth/login - Exchange the admin password for a session
//! - POST /api/v1/auth/logout - Invalidate the current session
//! - GET /api/v1/auth/session - Check whether the caller is logged in

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::middleware::{extract_session_token, ApiError, AppState};
use crate::services::AuthServiceError;

/// Request body for admin login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response for successful authentication
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
}

/// Response for the session check
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

/// Build the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(check_session))
}

/// POST /api/v1/auth/login - Admin login
///
/// On success the session token is returned in the body and set as an
/// HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth_service
        .login(&body.password)
        .await
        .map_err(|e| match e {
            AuthServiceError::InvalidCredentials => ApiError::unauthorized("Invalid password"),
            AuthServiceError::NotConfigured => {
                ApiError::internal_error("Admin access is not configured")
            }
            AuthServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        })?;

    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        session.id, max_age
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie value: {}", e)))?,
    );

    Ok((
        headers,
        Json(AuthResponse {
            token: session.id,
            expires_at: session.expires_at.to_rfc3339(),
        }),
    ))
}

/// POST /api/v1/auth/logout - Invalidate the current session
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_session_token(&headers) {
        state
            .auth_service
            .logout(&token)
            .await
            .map_err(|e| ApiError::internal_error(e.to_string()))?;
    }

    // Clear the session cookie either way
    let clear_cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";
    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::SET_COOKIE, HeaderValue::from_static(clear_cookie));

    Ok((StatusCode::NO_CONTENT, response_headers))
}

/// GET /api/v1/auth/session - Check whether the caller is logged in
pub async fn check_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let authenticated = match extract_session_token(&headers) {
        Some(token) => matches!(state.auth_service.validate(&token).await, Ok(Some(_))),
        None => false,
    };

    Json(SessionResponse { authenticated })
}
