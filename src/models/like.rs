//! Like model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like entity, one row per (post, visitor IP) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_ip: String,
    pub created_at: DateTime<Utc>,
}

/// Result of toggling a like: the caller's new state plus the post total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    /// Whether the caller now likes the post
    pub liked: bool,
    /// Total number of likes on the post after the toggle
    pub like_count: i64,
}
