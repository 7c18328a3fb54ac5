//! Cache layer
//!
//! This module provides caching for the Pressa blog engine. Posts are read
//! far more often than they change, so the services keep the post snapshot in
//! a process-local moka cache and drop it on every mutation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pressa::cache::{create_cache, CacheLayer};
//! use pressa::config::CacheConfig;
//!
//! let config = CacheConfig::default();
//! let cache = create_cache(&config);
//! cache.set("key", &"value").await?;
//! ```

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

/// Cache layer trait
///
/// This trait defines the interface for cache implementations.
/// Note: Due to Rust's object safety rules, this trait cannot be used
/// as a trait object (`dyn CacheLayer`); services hold the concrete
/// `Cache` type instead.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Set a value in cache
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete all values matching a pattern
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;

    /// Clear all cache entries
    async fn clear(&self) -> Result<()>;
}

pub use memory::MemoryCache;

/// The cache implementation used throughout the application
pub type Cache = MemoryCache;

/// Create a cache instance based on configuration
///
/// # Arguments
/// * `config` - Cache configuration specifying TTL and capacity
///
/// # Returns
/// An `Arc<Cache>` that can be shared across threads
pub fn create_cache(config: &CacheConfig) -> Arc<Cache> {
    let ttl = Duration::from_secs(config.ttl_seconds);
    Arc::new(MemoryCache::with_capacity_and_ttl(config.max_entries, ttl))
}
