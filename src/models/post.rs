//! Post model
//!
//! This module provides:
//! - `Post` entity representing a blog post
//! - `SavePostInput` carrying the user-editable fields of a save request
//! - `NewPost` describing a fully-resolved insert record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity
///
/// `url_id`, `date`, `views` and `likes` are system-managed: the slug is
/// derived from the title once at creation, the date is the creation instant,
/// and the counters only move through the view/like operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier
    pub id: i64,
    /// URL-friendly slug derived from the title at creation
    pub url_id: String,
    /// Post title
    pub title: String,
    /// Short summary shown in list views
    pub description: String,
    /// Markdown content
    pub content: String,
    /// Cover image URL
    pub image_url: String,
    /// Free-text category
    pub category: String,
    /// Comma-separated tag list
    pub tags: String,
    /// Publication timestamp
    pub date: DateTime<Utc>,
    /// View counter
    #[serde(default)]
    pub views: i64,
    /// Like counter (mirrors the number of like rows)
    #[serde(default)]
    pub likes: i64,
    /// Whether the post is visible on the public site
    pub active: bool,
}

impl Post {
    /// Split the raw tag string into trimmed tag names, dropping empties
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// The user-editable fields of a post save request.
///
/// `id == 0` is the "new post" sentinel: the save path creates a record and
/// derives slug/date/counters itself. Any other id updates exactly these
/// fields on the existing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePostInput {
    /// Target post id, or 0 to create
    #[serde(default)]
    pub id: i64,
    /// Post title
    pub title: String,
    /// Short summary
    pub description: String,
    /// Markdown content
    pub content: String,
    /// Cover image URL
    pub image_url: String,
    /// Free-text category
    #[serde(default)]
    pub category: String,
    /// Comma-separated tag list
    pub tags: String,
    /// Visibility flag
    #[serde(default)]
    pub active: bool,
}

impl SavePostInput {
    /// Whether this input asks for a new post
    pub fn is_create(&self) -> bool {
        self.id == 0
    }
}

/// A fully-resolved record ready for insertion
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Derived URL slug
    pub url_id: String,
    /// Post title
    pub title: String,
    /// Short summary
    pub description: String,
    /// Markdown content
    pub content: String,
    /// Cover image URL
    pub image_url: String,
    /// Free-text category
    pub category: String,
    /// Comma-separated tag list
    pub tags: String,
    /// Publication timestamp
    pub date: DateTime<Utc>,
    /// Visibility flag
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 1,
            url_id: "sample".to_string(),
            title: "Sample".to_string(),
            description: "d".to_string(),
            content: "c".to_string(),
            image_url: "https://example.com/i.png".to_string(),
            category: "General".to_string(),
            tags: "Front-End, Dev Tools".to_string(),
            date: Utc::now(),
            views: 0,
            likes: 0,
            active: true,
        }
    }

    #[test]
    fn test_tag_list_trims_and_splits() {
        let post = sample_post();
        assert_eq!(post.tag_list(), vec!["Front-End", "Dev Tools"]);
    }

    #[test]
    fn test_tag_list_drops_empty_segments() {
        let mut post = sample_post();
        post.tags = "One,,Two, ".to_string();
        assert_eq!(post.tag_list(), vec!["One", "Two"]);

        post.tags = String::new();
        assert!(post.tag_list().is_empty());
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let json = serde_json::to_value(sample_post()).expect("serialize");
        assert_eq!(json["urlId"], "sample");
        assert_eq!(json["imageUrl"], "https://example.com/i.png");
        assert!(json.get("url_id").is_none());
    }

    #[test]
    fn test_save_input_accepts_camel_case_payload() {
        let input: SavePostInput = serde_json::from_value(serde_json::json!({
            "id": 0,
            "title": "Hello",
            "description": "d",
            "content": "c",
            "imageUrl": "https://example.com/i.png",
            "category": "Node",
            "tags": "a,b",
            "active": true,
        }))
        .expect("deserialize");
        assert_eq!(input.image_url, "https://example.com/i.png");
        assert!(input.is_create());
    }

    #[test]
    fn test_save_input_create_sentinel() {
        let input = SavePostInput {
            id: 0,
            title: "t".to_string(),
            description: "d".to_string(),
            content: "c".to_string(),
            image_url: "https://x/i.png".to_string(),
            category: String::new(),
            tags: "a".to_string(),
            active: true,
        };
        assert!(input.is_create());

        let update = SavePostInput { id: 7, ..input };
        assert!(!update.is_create());
    }
}
