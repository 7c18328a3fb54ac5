//! Admin authentication
//!
//! Checks the single admin password against its configured Argon2 hash and
//! manages the opaque session tokens handed to the admin client. There are
//! no user accounts; whoever holds the password is the admin.

use crate::config::AdminConfig;
use crate::db::repositories::SessionRepository;
use crate::models::Session;
use crate::services::password::verify_password;
use anyhow::Context;
use std::sync::Arc;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No admin password hash configured
    #[error("Admin access is not configured")]
    NotConfigured,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Authentication service for the admin surface
pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    password_hash: Option<String>,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(sessions: Arc<dyn SessionRepository>, config: &AdminConfig) -> Self {
        Self {
            sessions,
            password_hash: config.password_hash.clone(),
            session_ttl_hours: config.session_ttl_hours,
        }
    }

    /// Exchange the admin password for a fresh session.
    ///
    /// # Errors
    /// - `NotConfigured` when no password hash is set
    /// - `InvalidCredentials` when the password does not match
    pub async fn login(&self, password: &str) -> Result<Session, AuthServiceError> {
        let hash = self
            .password_hash
            .as_deref()
            .ok_or(AuthServiceError::NotConfigured)?;

        let matches = verify_password(password, hash).context("Failed to verify password")?;
        if !matches {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Sweep stale sessions while we are here; failure is harmless
        let _ = self.sessions.delete_expired().await;

        let session = Session::new(self.session_ttl_hours);
        let created = self
            .sessions
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(created)
    }

    /// Resolve a session token to a live session, if any.
    ///
    /// Expired sessions are removed on sight and reported as absent.
    pub async fn validate(&self, token: &str) -> Result<Option<Session>, AuthServiceError> {
        let session = self
            .sessions
            .get_by_id(token)
            .await
            .context("Failed to look up session")?;

        match session {
            Some(s) if s.is_expired() => {
                let _ = self.sessions.delete(&s.id).await;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Invalidate a session token.
    pub async fn logout(&self, token: &str) -> Result<(), AuthServiceError> {
        self.sessions
            .delete(token)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }
}
