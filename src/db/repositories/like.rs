//! Like repository
//!
//! Database operations for per-IP post likes. Adding or removing a like row
//! keeps the denormalized `posts.likes` counter in step within the same call.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

/// Like repository trait
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Record a like for (post, IP).
    ///
    /// Returns `false` when the pair was already present; the counter is only
    /// bumped when a row was actually inserted.
    async fn add_like(&self, post_id: i64, user_ip: &str) -> Result<bool>;

    /// Remove a like for (post, IP).
    ///
    /// Returns `false` when no such pair existed.
    async fn remove_like(&self, post_id: i64, user_ip: &str) -> Result<bool>;

    /// Check whether this IP currently likes the post
    async fn is_liked(&self, post_id: i64, user_ip: &str) -> Result<bool>;

    /// Count likes recorded for a post
    async fn count_for_post(&self, post_id: i64) -> Result<i64>;
}

/// SQLx-based like repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxLikeRepository {
    pool: DynDatabasePool,
}

impl SqlxLikeRepository {
    /// Create a new SQLx like repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn LikeRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl LikeRepository for SqlxLikeRepository {
    async fn add_like(&self, post_id: i64, user_ip: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                add_like_sqlite(self.pool.as_sqlite().unwrap(), post_id, user_ip).await
            }
            DatabaseDriver::Mysql => {
                add_like_mysql(self.pool.as_mysql().unwrap(), post_id, user_ip).await
            }
        }
    }

    async fn remove_like(&self, post_id: i64, user_ip: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                remove_like_sqlite(self.pool.as_sqlite().unwrap(), post_id, user_ip).await
            }
            DatabaseDriver::Mysql => {
                remove_like_mysql(self.pool.as_mysql().unwrap(), post_id, user_ip).await
            }
        }
    }

    async fn is_liked(&self, post_id: i64, user_ip: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                is_liked_sqlite(self.pool.as_sqlite().unwrap(), post_id, user_ip).await
            }
            DatabaseDriver::Mysql => {
                is_liked_mysql(self.pool.as_mysql().unwrap(), post_id, user_ip).await
            }
        }
    }

    async fn count_for_post(&self, post_id: i64) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                count_for_post_sqlite(self.pool.as_sqlite().unwrap(), post_id).await
            }
            DatabaseDriver::Mysql => {
                count_for_post_mysql(self.pool.as_mysql().unwrap(), post_id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn add_like_sqlite(pool: &SqlitePool, post_id: i64, user_ip: &str) -> Result<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO likes (post_id, user_ip, created_at) VALUES (?, ?, ?)",
    )
    .bind(post_id)
    .bind(user_ip)
    .bind(Utc::now())
    .execute(pool)
    .await
    .context("Failed to add like")?;

    if result.rows_affected() > 0 {
        sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = ?")
            .bind(post_id)
            .execute(pool)
            .await
            .context("Failed to bump like counter")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn remove_like_sqlite(pool: &SqlitePool, post_id: i64, user_ip: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = ? AND user_ip = ?")
        .bind(post_id)
        .bind(user_ip)
        .execute(pool)
        .await
        .context("Failed to remove like")?;

    if result.rows_affected() > 0 {
        sqlx::query("UPDATE posts SET likes = MAX(0, likes - 1) WHERE id = ?")
            .bind(post_id)
            .execute(pool)
            .await
            .context("Failed to drop like counter")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn is_liked_sqlite(pool: &SqlitePool, post_id: i64, user_ip: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ? AND user_ip = ?")
            .bind(post_id)
            .bind(user_ip)
            .fetch_one(pool)
            .await
            .context("Failed to check like")?;

    Ok(count > 0)
}

async fn count_for_post_sqlite(pool: &SqlitePool, post_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await
        .context("Failed to count likes")?;

    Ok(count)
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn add_like_mysql(pool: &MySqlPool, post_id: i64, user_ip: &str) -> Result<bool> {
    let result =
        sqlx::query("INSERT IGNORE INTO likes (post_id, user_ip, created_at) VALUES (?, ?, ?)")
            .bind(post_id)
            .bind(user_ip)
            .bind(Utc::now())
            .execute(pool)
            .await
            .context("Failed to add like")?;

    if result.rows_affected() > 0 {
        sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = ?")
            .bind(post_id)
            .execute(pool)
            .await
            .context("Failed to bump like counter")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn remove_like_mysql(pool: &MySqlPool, post_id: i64, user_ip: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = ? AND user_ip = ?")
        .bind(post_id)
        .bind(user_ip)
        .execute(pool)
        .await
        .context("Failed to remove like")?;

    if result.rows_affected() > 0 {
        sqlx::query("UPDATE posts SET likes = GREATEST(likes - 1, 0) WHERE id = ?")
            .bind(post_id)
            .execute(pool)
            .await
            .context("Failed to drop like counter")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

async fn is_liked_mysql(pool: &MySqlPool, post_id: i64, user_ip: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ? AND user_ip = ?")
            .bind(post_id)
            .bind(user_ip)
            .fetch_one(pool)
            .await
            .context("Failed to check like")?;

    Ok(count > 0)
}

async fn count_for_post_mysql(pool: &MySqlPool, post_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await
        .context("Failed to count likes")?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::post::{PostRepository, SqlxPostRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::NewPost;

    async fn setup() -> (SqlxPostRepository, SqlxLikeRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let posts = SqlxPostRepository::new(pool.clone());
        let likes = SqlxLikeRepository::new(pool.clone());

        let post = posts
            .insert(&NewPost {
                url_id: "liked-post".to_string(),
                title: "Liked Post".to_string(),
                description: "A post people like".to_string(),
                content: "Body".to_string(),
                image_url: "https://images.example.com/cover.jpg".to_string(),
                category: "Rust".to_string(),
                tags: "Web".to_string(),
                date: Utc::now(),
                active: true,
            })
            .await
            .expect("Failed to insert post");

        (posts, likes, post.id)
    }

    #[tokio::test]
    async fn test_add_like_bumps_counter_once() {
        let (posts, likes, post_id) = setup().await;

        assert!(likes.add_like(post_id, "10.0.0.1").await.unwrap());
        // Same IP again is a no-op
        assert!(!likes.add_like(post_id, "10.0.0.1").await.unwrap());

        let post = posts.get_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.likes, 1);
        assert_eq!(likes.count_for_post(post_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_like_drops_counter() {
        let (posts, likes, post_id) = setup().await;

        likes.add_like(post_id, "10.0.0.1").await.unwrap();
        assert!(likes.remove_like(post_id, "10.0.0.1").await.unwrap());
        assert!(!likes.remove_like(post_id, "10.0.0.1").await.unwrap());

        let post = posts.get_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.likes, 0);
    }

    #[tokio::test]
    async fn test_counter_never_goes_negative() {
        let (posts, likes, post_id) = setup().await;

        // Removing without a prior like leaves the counter alone
        assert!(!likes.remove_like(post_id, "10.0.0.9").await.unwrap());

        let post = posts.get_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.likes, 0);
    }

    #[tokio::test]
    async fn test_is_liked_per_ip() {
        let (_posts, likes, post_id) = setup().await;

        likes.add_like(post_id, "10.0.0.1").await.unwrap();

        assert!(likes.is_liked(post_id, "10.0.0.1").await.unwrap());
        assert!(!likes.is_liked(post_id, "10.0.0.2").await.unwrap());
    }

    #[tokio::test]
    async fn test_distinct_ips_accumulate() {
        let (posts, likes, post_id) = setup().await;

        for i in 1..=3 {
            likes
                .add_like(post_id, &format!("10.0.0.{}", i))
                .await
                .unwrap();
        }

        let post = posts.get_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.likes, 3);
        assert_eq!(likes.count_for_post(post_id).await.unwrap(), 3);
    }
}
