//! Post repository
//!
//! Database operations for blog posts.
//!
//! This module provides:
//! - `PostRepository` trait defining the interface for post data access
//! - `SqlxPostRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{NewPost, Post, SavePostInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Load every post, newest first (ties break by insertion order)
    async fn list_all(&self) -> Result<Vec<Post>>;

    /// Get post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>>;

    /// Get post by URL id (slug)
    async fn get_by_url_id(&self, url_id: &str) -> Result<Option<Post>>;

    /// Insert a new post
    async fn insert(&self, post: &NewPost) -> Result<Post>;

    /// Update the editable fields of an existing post.
    ///
    /// Slug, publication date, views and likes are never touched here.
    /// Returns `None` when no post with the given ID exists.
    async fn update(&self, id: i64, input: &SavePostInput) -> Result<Option<Post>>;

    /// Flip the active flag in a single statement
    async fn toggle_active(&self, id: i64) -> Result<Option<Post>>;

    /// Add one view and return the new count
    async fn increment_views(&self, id: i64) -> Result<Option<i64>>;

    /// Check if a URL id is already taken
    async fn exists_url_id(&self, url_id: &str) -> Result<bool>;
}

/// SQLx-based post repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxPostRepository {
    pool: DynDatabasePool,
}

impl SqlxPostRepository {
    /// Create a new SQLx post repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_all_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_all_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_url_id(&self, url_id: &str) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_by_url_id_sqlite(self.pool.as_sqlite().unwrap(), url_id).await
            }
            DatabaseDriver::Mysql => {
                get_by_url_id_mysql(self.pool.as_mysql().unwrap(), url_id).await
            }
        }
    }

    async fn insert(&self, post: &NewPost) -> Result<Post> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_sqlite(self.pool.as_sqlite().unwrap(), post).await,
            DatabaseDriver::Mysql => insert_mysql(self.pool.as_mysql().unwrap(), post).await,
        }
    }

    async fn update(&self, id: i64, input: &SavePostInput) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_sqlite(self.pool.as_sqlite().unwrap(), id, input).await
            }
            DatabaseDriver::Mysql => update_mysql(self.pool.as_mysql().unwrap(), id, input).await,
        }
    }

    async fn toggle_active(&self, id: i64) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => toggle_active_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => toggle_active_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn increment_views(&self, id: i64) -> Result<Option<i64>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                increment_views_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => increment_views_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn exists_url_id(&self, url_id: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                exists_url_id_sqlite(self.pool.as_sqlite().unwrap(), url_id).await
            }
            DatabaseDriver::Mysql => {
                exists_url_id_mysql(self.pool.as_mysql().unwrap(), url_id).await
            }
        }
    }
}

const POST_COLUMNS: &str =
    "id, url_id, title, description, content, image_url, category, tags, date, views, likes, active";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_all_sqlite(pool: &SqlitePool) -> Result<Vec<Post>> {
    let rows = sqlx::query(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY date DESC, id ASC"
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_sqlite(&row)?);
    }

    Ok(posts)
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_post_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_by_url_id_sqlite(pool: &SqlitePool, url_id: &str) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE url_id = ?"))
        .bind(url_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by URL id")?;

    match row {
        Some(row) => Ok(Some(row_to_post_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn insert_sqlite(pool: &SqlitePool, post: &NewPost) -> Result<Post> {
    let result = sqlx::query(
        r#"
        INSERT INTO posts (url_id, title, description, content, image_url, category, tags, date, views, likes, active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(&post.url_id)
    .bind(&post.title)
    .bind(&post.description)
    .bind(&post.content)
    .bind(&post.image_url)
    .bind(&post.category)
    .bind(&post.tags)
    .bind(post.date)
    .bind(post.active)
    .execute(pool)
    .await
    .context("Failed to insert post")?;

    let id = result.last_insert_rowid();

    Ok(Post {
        id,
        url_id: post.url_id.clone(),
        title: post.title.clone(),
        description: post.description.clone(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        category: post.category.clone(),
        tags: post.tags.clone(),
        date: post.date,
        views: 0,
        likes: 0,
        active: post.active,
    })
}

async fn update_sqlite(pool: &SqlitePool, id: i64, input: &SavePostInput) -> Result<Option<Post>> {
    if get_by_id_sqlite(pool, id).await?.is_none() {
        return Ok(None);
    }

    sqlx::query(
        r#"
        UPDATE posts
        SET title = ?, description = ?, content = ?, image_url = ?, category = ?, tags = ?, active = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.image_url)
    .bind(&input.category)
    .bind(&input.tags)
    .bind(input.active)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update post")?;

    get_by_id_sqlite(pool, id).await
}

async fn toggle_active_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Post>> {
    let result = sqlx::query("UPDATE posts SET active = NOT active WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to toggle post visibility")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id_sqlite(pool, id).await
}

async fn increment_views_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<i64>> {
    let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to increment post views")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let views: i64 = sqlx::query_scalar("SELECT views FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to read post views")?;

    Ok(Some(views))
}

async fn exists_url_id_sqlite(pool: &SqlitePool, url_id: &str) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE url_id = ?")
        .bind(url_id)
        .fetch_one(pool)
        .await
        .context("Failed to check URL id existence")?;

    let count: i64 = row.get("count");
    Ok(count > 0)
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Post> {
    Ok(Post {
        id: row.get("id"),
        url_id: row.get("url_id"),
        title: row.get("title"),
        description: row.get("description"),
        content: row.get("content"),
        image_url: row.get("image_url"),
        category: row.get("category"),
        tags: row.get("tags"),
        date: row.get("date"),
        views: row.try_get("views").unwrap_or(0),
        likes: row.try_get("likes").unwrap_or(0),
        active: row.get("active"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_all_mysql(pool: &MySqlPool) -> Result<Vec<Post>> {
    let rows = sqlx::query(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY date DESC, id ASC"
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list posts")?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row_to_post_mysql(&row)?);
    }

    Ok(posts)
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_post_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_by_url_id_mysql(pool: &MySqlPool, url_id: &str) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE url_id = ?"))
        .bind(url_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get post by URL id")?;

    match row {
        Some(row) => Ok(Some(row_to_post_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn insert_mysql(pool: &MySqlPool, post: &NewPost) -> Result<Post> {
    let result = sqlx::query(
        r#"
        INSERT INTO posts (url_id, title, description, content, image_url, category, tags, date, views, likes, active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(&post.url_id)
    .bind(&post.title)
    .bind(&post.description)
    .bind(&post.content)
    .bind(&post.image_url)
    .bind(&post.category)
    .bind(&post.tags)
    .bind(post.date)
    .bind(post.active)
    .execute(pool)
    .await
    .context("Failed to insert post")?;

    let id = result.last_insert_id() as i64;

    Ok(Post {
        id,
        url_id: post.url_id.clone(),
        title: post.title.clone(),
        description: post.description.clone(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        category: post.category.clone(),
        tags: post.tags.clone(),
        date: post.date,
        views: 0,
        likes: 0,
        active: post.active,
    })
}

async fn update_mysql(pool: &MySqlPool, id: i64, input: &SavePostInput) -> Result<Option<Post>> {
    if get_by_id_mysql(pool, id).await?.is_none() {
        return Ok(None);
    }

    sqlx::query(
        r#"
        UPDATE posts
        SET title = ?, description = ?, content = ?, image_url = ?, category = ?, tags = ?, active = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.content)
    .bind(&input.image_url)
    .bind(&input.category)
    .bind(&input.tags)
    .bind(input.active)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update post")?;

    get_by_id_mysql(pool, id).await
}

async fn toggle_active_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Post>> {
    let result = sqlx::query("UPDATE posts SET active = NOT active WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to toggle post visibility")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id_mysql(pool, id).await
}

async fn increment_views_mysql(pool: &MySqlPool, id: i64) -> Result<Option<i64>> {
    let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to increment post views")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let views: i64 = sqlx::query_scalar("SELECT views FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to read post views")?;

    Ok(Some(views))
}

async fn exists_url_id_mysql(pool: &MySqlPool, url_id: &str) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE url_id = ?")
        .bind(url_id)
        .fetch_one(pool)
        .await
        .context("Failed to check URL id existence")?;

    let count: i64 = row.get("count");
    Ok(count > 0)
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Post> {
    Ok(Post {
        id: row.get("id"),
        url_id: row.get("url_id"),
        title: row.get("title"),
        description: row.get("description"),
        content: row.get("content"),
        image_url: row.get("image_url"),
        category: row.get("category"),
        tags: row.get("tags"),
        date: row.get("date"),
        views: row.try_get("views").unwrap_or(0),
        likes: row.try_get("likes").unwrap_or(0),
        active: row.get("active"),
    })
}
