//! Database layer
//!
//! This module provides database abstraction for the Pressa blog engine.
//! It supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! The database driver is selected based on configuration.
//!
//! # Architecture
//!
//! The database layer uses a trait-based abstraction (`DatabasePool`) that
//! allows the application to work with either SQLite or MySQL without
//! knowing the specific backend.
//!
//! # Usage
//!
//! ```ignore
//! use pressa::config::DatabaseConfig;
//! use pressa::db::{create_pool, DatabasePool, migrations};
//!
//! // Create pool from configuration
//! let config = DatabaseConfig::default();
//! let pool = create_pool(&config).await?;
//!
//! // Run migrations
//! migrations::run_migrations(&pool).await?;
//!
//! // Use the pool
//! pool.ping().await?;
//!
//! // Access the underlying pool for specific operations
//! if let Some(sqlite_pool) = pool.as_sqlite() {
//!     // SQLite-specific operations
//! }
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seed;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
