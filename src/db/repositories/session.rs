//! Session repository
//!
//! Database operations for admin sessions.
//!
//! This module provides:
//! - `SessionRepository` trait defining the interface for session data access
//! - `SqlxSessionRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, session: &Session) -> Result<Session>;

    /// Get session by ID (token)
    async fn get_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Delete a session
    async fn delete(&self, id: &str) -> Result<()>;

    /// Delete expired sessions
    async fn delete_expired(&self) -> Result<i64>;
}

/// SQLx-based session repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxSessionRepository {
    pool: DynDatabasePool,
}

impl SqlxSessionRepository {
    /// Create a new SQLx session repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_session_sqlite(self.pool.as_sqlite().unwrap(), session).await
            }
            DatabaseDriver::Mysql => {
                create_session_mysql(self.pool.as_mysql().unwrap(), session).await
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Session>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_session_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => {
                get_session_by_id_mysql(self.pool.as_mysql().unwrap(), id).await
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_session_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => delete_session_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn delete_expired(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_expired_sessions_sqlite(self.pool.as_sqlite().unwrap()).await
            }
            DatabaseDriver::Mysql => {
                delete_expired_sessions_mysql(self.pool.as_mysql().unwrap()).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_session_sqlite(pool: &SqlitePool, session: &Session) -> Result<Session> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, expires_at, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&session.id)
    .bind(session.expires_at)
    .bind(session.created_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(session.clone())
}

async fn get_session_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT id, expires_at, created_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get session by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_session_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn delete_session_sqlite(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete session")?;

    Ok(())
}

async fn delete_expired_sessions_sqlite(pool: &SqlitePool) -> Result<i64> {
    let now = Utc::now();
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to delete expired sessions")?;

    Ok(result.rows_affected() as i64)
}

fn row_to_session_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Session> {
    Ok(Session {
        id: row.get("id"),
        expires_at: row.get("expires_at"),
        created_at: row.get("created_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_session_mysql(pool: &MySqlPool, session: &Session) -> Result<Session> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, expires_at, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&session.id)
    .bind(session.expires_at)
    .bind(session.created_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(session.clone())
}

async fn get_session_by_id_mysql(pool: &MySqlPool, id: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT id, expires_at, created_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get session by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_session_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn delete_session_mysql(pool: &MySqlPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete session")?;

    Ok(())
}

async fn delete_expired_sessions_mysql(pool: &MySqlPool) -> Result<i64> {
    let now = Utc::now();
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to delete expired sessions")?;

    Ok(result.rows_affected() as i64)
}

fn row_to_session_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Session> {
    let expires_at: DateTime<Utc> = row.get("expires_at");
    let created_at: DateTime<Utc> = row.get("created_at");

    Ok(Session {
        id: row.get("id"),
        expires_at,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;
    use uuid::Uuid;

    async fn setup_test_repo() -> SqlxSessionRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxSessionRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let repo = setup_test_repo().await;

        let session = Session::new(24);
        let created = repo.create(&session).await.expect("Failed to create");
        assert_eq!(created.id, session.id);

        let found = repo
            .get_by_id(&session.id)
            .await
            .expect("Failed to get session")
            .expect("Session not found");

        assert_eq!(found.id, session.id);
        assert!(!found.is_expired());
    }

    #[tokio::test]
    async fn test_get_session_not_found() {
        let repo = setup_test_repo().await;

        let found = repo
            .get_by_id("nonexistent-session-id")
            .await
            .expect("Failed to get session");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let repo = setup_test_repo().await;

        let session = Session::new(24);
        repo.create(&session).await.expect("Failed to create");

        repo.delete(&session.id).await.expect("Failed to delete");

        let found = repo
            .get_by_id(&session.id)
            .await
            .expect("Failed to get session");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_sessions() {
        let repo = setup_test_repo().await;

        let now = Utc::now();
        let expired = Session {
            id: Uuid::new_v4().to_string(),
            expires_at: now - Duration::hours(1),
            created_at: now - Duration::hours(25),
        };
        let valid = Session::new(24);

        repo.create(&expired).await.expect("Failed to create");
        repo.create(&valid).await.expect("Failed to create");

        let deleted = repo
            .delete_expired()
            .await
            .expect("Failed to delete expired");
        assert_eq!(deleted, 1);

        assert!(repo.get_by_id(&expired.id).await.unwrap().is_none());
        assert!(repo.get_by_id(&valid.id).await.unwrap().is_some());
    }
}
