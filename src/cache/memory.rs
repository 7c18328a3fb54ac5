//! In-memory cache implementation using moka
//!
//! Provides a fast, thread-safe in-memory cache with TTL support.
//!
//! # Features
//! - TTL-based expiration for each cache entry
//! - Glob-style pattern matching for bulk deletion
//! - Thread-safe concurrent access

use super::CacheLayer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default maximum cache capacity (number of entries)
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Default TTL for cache entries
const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cache entry wrapper that stores serialized JSON data
/// This allows us to store any serializable type in the cache
#[derive(Clone)]
struct CacheEntry {
    /// JSON-serialized value
    data: Arc<String>,
}

impl CacheEntry {
    fn new<T: Serialize>(value: &T) -> Result<Self> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        Ok(Self {
            data: Arc::new(json),
        })
    }

    fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.data).context("Failed to deserialize cache value")
    }
}

/// In-memory cache using moka
///
/// Values are stored as JSON strings to support generic types.
pub struct MemoryCache {
    /// The underlying moka cache instance
    cache: Cache<String, CacheEntry>,
    /// TTL applied to every entry
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MemoryCache {
    /// Create a new memory cache with default settings
    pub fn new() -> Self {
        Self::with_capacity_and_ttl(DEFAULT_MAX_CAPACITY, DEFAULT_TTL)
    }

    /// Create a new memory cache with custom capacity and TTL
    ///
    /// # Arguments
    /// * `max_capacity` - Maximum number of entries the cache can hold
    /// * `default_ttl` - Time-to-live applied to every entry
    pub fn with_capacity_and_ttl(max_capacity: u64, default_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(default_ttl)
            .build();

        Self { cache, default_ttl }
    }

    /// Get the TTL applied to entries of this cache
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get the current number of entries in the cache
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Check if a pattern matches a key using glob-style matching
    ///
    /// Supports:
    /// - `*` matches any sequence of characters
    /// - `?` matches any single character
    fn pattern_matches(pattern: &str, key: &str) -> bool {
        let pattern_chars: Vec<char> = pattern.chars().collect();
        let key_chars: Vec<char> = key.chars().collect();
        Self::glob_match(&pattern_chars, &key_chars, 0, 0)
    }

    /// Recursive glob pattern matching
    fn glob_match(pattern: &[char], key: &[char], pi: usize, ki: usize) -> bool {
        if pi == pattern.len() {
            return ki == key.len();
        }

        match pattern[pi] {
            '*' => {
                // Match zero characters first, then grow
                if Self::glob_match(pattern, key, pi + 1, ki) {
                    return true;
                }
                if ki < key.len() && Self::glob_match(pattern, key, pi, ki + 1) {
                    return true;
                }
                false
            }
            '?' => {
                if ki < key.len() {
                    Self::glob_match(pattern, key, pi + 1, ki + 1)
                } else {
                    false
                }
            }
            p => {
                if ki < key.len() && key[ki] == p {
                    Self::glob_match(pattern, key, pi + 1, ki + 1)
                } else {
                    false
                }
            }
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    /// Get a value from cache
    ///
    /// Returns `Ok(Some(value))` if the key exists and hasn't expired,
    /// `Ok(None)` if the key doesn't exist or has expired.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(entry) => {
                let value = entry.deserialize()?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache
    ///
    /// The entry expires after the cache-wide TTL. An existing key is
    /// overwritten.
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let entry = CacheEntry::new(value)?;
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    /// Delete a value from cache
    ///
    /// If the key doesn't exist, this is a no-op.
    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    /// Delete all values matching a glob-style pattern
    ///
    /// # Examples
    /// - `posts:*` deletes all keys starting with `posts:`
    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        // Requires a scan over all keys; fine at this cache's scale
        let keys_to_delete: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| Self::pattern_matches(pattern, key.as_ref()))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in keys_to_delete {
            self.cache.invalidate(&key).await;
        }

        Ok(())
    }

    /// Clear all cache entries
    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}
