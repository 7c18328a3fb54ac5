//! Database migrations module
//!
//! This module provides code-based database migrations for the Pressa blog
//! engine. All migrations are embedded directly in Rust code as SQL strings,
//! supporting both SQLite and MySQL databases for single-binary deployment.
//!
//! # Usage
//!
//! ```ignore
//! use pressa::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```
//!
//! # Architecture
//!
//! Each migration is defined as a `Migration` struct containing:
//! - `version`: Unique version number for ordering
//! - `name`: Human-readable migration name
//! - `up_sqlite`: SQL for SQLite database
//! - `up_mysql`: SQL for MySQL database

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    /// Migration version number
    pub version: i64,
    /// Migration name/description
    pub name: String,
    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
}

/// All migrations for the Pressa blog engine.
/// These are embedded in the binary for single-binary deployment.
pub const MIGRATIONS: &[Migration] = &[
    // Migration 1: Create posts table
    Migration {
        version: 1,
        name: "create_posts",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url_id VARCHAR(255) NOT NULL UNIQUE,
                title VARCHAR(255) NOT NULL,
                description TEXT NOT NULL,
                content TEXT NOT NULL,
                image_url VARCHAR(500) NOT NULL,
                category VARCHAR(100) NOT NULL DEFAULT '',
                tags VARCHAR(500) NOT NULL DEFAULT '',
                date TIMESTAMP NOT NULL,
                views INTEGER NOT NULL DEFAULT 0,
                likes INTEGER NOT NULL DEFAULT 0,
                active INTEGER NOT NULL DEFAULT 1
            );
            CREATE INDEX IF NOT EXISTS idx_posts_url_id ON posts(url_id);
            CREATE INDEX IF NOT EXISTS idx_posts_active ON posts(active);
            CREATE INDEX IF NOT EXISTS idx_posts_date ON posts(date);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS posts (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                url_id VARCHAR(255) NOT NULL UNIQUE,
                title VARCHAR(255) NOT NULL,
                description TEXT NOT NULL,
                content TEXT NOT NULL,
                image_url VARCHAR(500) NOT NULL,
                category VARCHAR(100) NOT NULL DEFAULT '',
                tags VARCHAR(500) NOT NULL DEFAULT '',
                date DATETIME NOT NULL,
                views INT NOT NULL DEFAULT 0,
                likes INT NOT NULL DEFAULT 0,
                active TINYINT NOT NULL DEFAULT 1
            );
            CREATE INDEX idx_posts_url_id ON posts(url_id);
            CREATE INDEX idx_posts_active ON posts(active);
            CREATE INDEX idx_posts_date ON posts(date);
        "#,
    },
    // Migration 2: Create likes table
    // One row per (post, visitor IP); the unique key is what makes the
    // like toggle deduplicate under racing requests.
    Migration {
        version: 2,
        name: "create_likes",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS likes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id INTEGER NOT NULL,
                user_ip VARCHAR(45) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
                UNIQUE(post_id, user_ip)
            );
            CREATE INDEX IF NOT EXISTS idx_likes_post_id ON likes(post_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS likes (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                post_id BIGINT NOT NULL,
                user_ip VARCHAR(45) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
                UNIQUE KEY uk_likes_post_ip (post_id, user_ip)
            );
            CREATE INDEX idx_likes_post_id ON likes(post_id);
        "#,
    },
    // Migration 3: Create sessions table for the admin login
    Migration {
        version: 3,
        name: "create_sessions",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id VARCHAR(64) PRIMARY KEY,
                expires_at TIMESTAMP NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id VARCHAR(64) PRIMARY KEY,
                expires_at TIMESTAMP NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
        "#,
    },
];

/// Run all pending migrations
///
/// This function:
/// 1. Creates the migrations tracking table if it doesn't exist
/// 2. Checks which migrations have already been applied
/// 3. Runs any pending migrations in order
///
/// # Returns
///
/// Number of migrations applied
///
/// # Errors
///
/// Returns an error if any migration fails to apply
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i32> = applied.iter().map(|m| m.version as i32).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

/// Get list of already applied migrations
async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    match pool.driver() {
        DatabaseDriver::Sqlite => get_applied_migrations_sqlite(pool.as_sqlite().unwrap()).await,
        DatabaseDriver::Mysql => get_applied_migrations_mysql(pool.as_mysql().unwrap()).await,
    }
}

async fn get_applied_migrations_sqlite(pool: &SqlitePool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

async fn get_applied_migrations_mysql(pool: &MySqlPool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

/// Apply a single migration
async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match pool.driver() {
        DatabaseDriver::Sqlite => {
            apply_migration_sqlite(pool.as_sqlite().unwrap(), migration).await
        }
        DatabaseDriver::Mysql => apply_migration_mysql(pool.as_mysql().unwrap(), migration).await,
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    // Execute migration SQL (may contain multiple statements)
    for statement in split_sql_statements(migration.up_sqlite) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

async fn apply_migration_mysql(pool: &MySqlPool, migration: &Migration) -> Result<()> {
    // Execute migration SQL (may contain multiple statements)
    for statement in split_sql_statements(migration.up_mysql) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

/// Split SQL into individual statements, handling comments properly
fn split_sql_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut current_start = 0;
    let mut in_statement = false;

    for (i, c) in sql.char_indices() {
        match c {
            ';' => {
                if in_statement {
                    let stmt = sql[current_start..i].trim();
                    if !stmt.is_empty() && !is_comment_only(stmt) {
                        statements.push(stmt);
                    }
                    in_statement = false;
                }
                current_start = i + 1;
            }
            _ if !c.is_whitespace() && !in_statement => {
                current_start = i;
                in_statement = true;
            }
            _ => {}
        }
    }

    // Handle last statement without trailing semicolon
    if in_statement {
        let stmt = sql[current_start..].trim();
        if !stmt.is_empty() && !is_comment_only(stmt) {
            statements.push(stmt);
        }
    }

    statements
}

/// Check if a string contains only SQL comments
fn is_comment_only(s: &str) -> bool {
    for line in s.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with("--") {
            return false;
        }
    }
    true
}

/// Check if migrations are up to date
pub async fn is_up_to_date(pool: &DynDatabasePool) -> Result<bool> {
    let _ = create_migrations_table(pool).await;

    let applied = get_applied_migrations(pool).await?;
    Ok(applied.len() == MIGRATIONS.len())
}

/// Get pending migrations count
pub async fn pending_count(pool: &DynDatabasePool) -> Result<usize> {
    let _ = create_migrations_table(pool).await;

    let applied = get_applied_migrations(pool).await?;
    Ok(MIGRATIONS.len().saturating_sub(applied.len()))
}

/// Get the total number of migrations defined
pub fn total_migrations() -> usize {
    MIGRATIONS.len()
}

/// Get migration by version
pub fn get_migration(version: i32) -> Option<&'static Migration> {
    MIGRATIONS.iter().find(|m| m.version == version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_run_migrations() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, MIGRATIONS.len());

        // Running again should apply 0 migrations
        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_is_up_to_date() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let up_to_date = is_up_to_date(&pool).await.expect("Failed to check");
        assert!(!up_to_date);

        run_migrations(&pool).await.expect("Failed to run migrations");
        let up_to_date = is_up_to_date(&pool).await.expect("Failed to check");
        assert!(up_to_date);
    }

    #[tokio::test]
    async fn test_pending_count() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let pending = pending_count(&pool).await.expect("Failed to check");
        assert_eq!(pending, MIGRATIONS.len());

        run_migrations(&pool).await.expect("Failed to run migrations");
        let pending = pending_count(&pool).await.expect("Failed to check");
        assert_eq!(pending, 0);
    }

    #[tokio::test]
    async fn test_posts_table_created() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();
        let result = sqlx::query(
            "INSERT INTO posts (url_id, title, description, content, image_url, category, tags, date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind("hello-world")
        .bind("Hello World")
        .bind("A first post")
        .bind("# Hello\n\nThis is content.")
        .bind("https://example.com/cover.jpg")
        .bind("General")
        .bind("First,Meta")
        .bind(Utc::now())
        .execute(sqlite_pool)
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_likes_table_rejects_duplicate_ip() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query(
            "INSERT INTO posts (url_id, title, description, content, image_url, date) \
             VALUES ('p', 't', 'd', 'c', 'https://x/i.png', ?)",
        )
        .bind(Utc::now())
        .execute(sqlite_pool)
        .await
        .expect("Failed to create post");

        sqlx::query("INSERT INTO likes (post_id, user_ip) VALUES (1, '1.2.3.4')")
            .execute(sqlite_pool)
            .await
            .expect("First like should insert");

        let dup = sqlx::query("INSERT INTO likes (post_id, user_ip) VALUES (1, '1.2.3.4')")
            .execute(sqlite_pool)
            .await;
        assert!(dup.is_err(), "Duplicate (post, ip) must violate the unique key");
    }

    #[tokio::test]
    async fn test_likes_cascade_on_post_delete() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query(
            "INSERT INTO posts (url_id, title, description, content, image_url, date) \
             VALUES ('p', 't', 'd', 'c', 'https://x/i.png', ?)",
        )
        .bind(Utc::now())
        .execute(sqlite_pool)
        .await
        .expect("Failed to create post");

        sqlx::query("INSERT INTO likes (post_id, user_ip) VALUES (1, '1.2.3.4')")
            .execute(sqlite_pool)
            .await
            .expect("Failed to insert like");

        sqlx::query("DELETE FROM posts WHERE id = 1")
            .execute(sqlite_pool)
            .await
            .expect("Failed to delete post");

        let row = sqlx::query("SELECT COUNT(*) as count FROM likes")
            .fetch_one(sqlite_pool)
            .await
            .expect("Failed to count likes");
        let count: i64 = row.get("count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_sessions_table_created() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let sqlite_pool = pool.as_sqlite().unwrap();

        let result = sqlx::query(
            "INSERT INTO sessions (id, expires_at) VALUES (?, datetime('now', '+1 day'))",
        )
        .bind("session123")
        .execute(sqlite_pool)
        .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_split_sql_statements() {
        let sql = "CREATE TABLE a (id INT); CREATE INDEX idx ON a(id);";
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE"));
        assert!(statements[1].starts_with("CREATE INDEX"));
    }

    #[test]
    fn test_split_sql_skips_comment_only_chunks() {
        let sql = "-- just a comment;\nCREATE TABLE a (id INT);";
        let statements = split_sql_statements(sql);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("CREATE TABLE"));
    }

    #[test]
    fn test_get_migration() {
        assert!(get_migration(1).is_some());
        assert_eq!(get_migration(1).unwrap().name, "create_posts");
        assert!(get_migration(999).is_none());
    }

    #[test]
    fn test_migration_versions_are_sequential() {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version, (i + 1) as i32);
        }
    }
}
