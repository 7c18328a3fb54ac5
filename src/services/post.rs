//! Post service
//!
//! Implements business logic for post management:
//! - Listing through the shared query pipeline
//! - Create-or-update saves with validation
//! - Visibility toggling
//! - View and like counters
//! - Cache invalidation

use crate::cache::{Cache, CacheLayer};
use crate::db::repositories::{LikeRepository, PostRepository};
use crate::models::{LikeToggle, NewPost, Post, PostPage, PostQuery, SavePostInput};
use crate::services::markdown::MarkdownRenderer;
use crate::services::query;
use anyhow::Context;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Cache key for the full post snapshot
const CACHE_KEY_ALL_POSTS: &str = "posts:all";

/// Cache key prefixes for single posts
const CACHE_KEY_POST_BY_ID: &str = "posts:id:";
const CACHE_KEY_POST_BY_URL: &str = "posts:url:";

/// Pattern covering every post cache entry
const CACHE_PATTERN_POSTS: &str = "posts:*";

/// Maximum description length in characters
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Image URLs must be absolute http(s) URLs without spaces or quotes
static IMAGE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^https?://[^ "]+$"#).expect("Image URL pattern is valid"));

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    /// Post not found
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Duplicate slug
    #[error("Post slug already exists: {0}")]
    DuplicateUrlId(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Post service for managing blog posts
///
/// Coordinates the post and like repositories, the cache layer and the
/// markdown renderer. All listing surfaces call [`PostService::list_posts`],
/// which funnels through the one shared query pipeline.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    likes: Arc<dyn LikeRepository>,
    cache: Arc<Cache>,
    markdown: MarkdownRenderer,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        likes: Arc<dyn LikeRepository>,
        cache: Arc<Cache>,
        markdown: MarkdownRenderer,
    ) -> Self {
        Self {
            posts,
            likes,
            cache,
            markdown,
        }
    }

    /// Load every post, visible and hidden alike.
    ///
    /// Storage failures degrade to an empty snapshot and a log line; they are
    /// never surfaced to listing callers.
    pub async fn all_posts(&self) -> Vec<Post> {
        match self.snapshot().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!("Failed to load post snapshot: {}", e);
                Vec::new()
            }
        }
    }

    /// Run a listing query against the current snapshot.
    pub async fn list_posts(&self, criteria: &PostQuery) -> PostPage {
        query::run(self.all_posts().await, criteria)
    }

    /// Get a post by its URL slug
    pub async fn get_post(&self, url_id: &str) -> Result<Option<Post>, PostServiceError> {
        let cache_key = format!("{}{}", CACHE_KEY_POST_BY_URL, url_id);
        if let Some(post) = self.cache.get::<Post>(&cache_key).await.ok().flatten() {
            return Ok(Some(post));
        }

        let post = self
            .posts
            .get_by_url_id(url_id)
            .await
            .context("Failed to get post by slug")?;

        if let Some(ref found) = post {
            let _ = self.cache.set(&cache_key, found).await;
        }

        Ok(post)
    }

    /// Get a post by its numeric ID
    pub async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, PostServiceError> {
        let cache_key = format!("{}{}", CACHE_KEY_POST_BY_ID, id);
        if let Some(post) = self.cache.get::<Post>(&cache_key).await.ok().flatten() {
            return Ok(Some(post));
        }

        let post = self
            .posts
            .get_by_id(id)
            .await
            .context("Failed to get post by ID")?;

        if let Some(ref found) = post {
            let _ = self.cache.set(&cache_key, found).await;
        }

        Ok(post)
    }

    /// Create or update a post.
    ///
    /// An input with `id == 0` creates a new post: the slug is derived from
    /// the title, the publication date is now, counters start at zero and the
    /// post goes live immediately. Any other id updates only the editable
    /// fields; slug, date, views and likes never change through this path.
    ///
    /// # Errors
    /// - `ValidationError` if a required field is missing or malformed
    /// - `DuplicateUrlId` if the derived slug is already taken
    /// - `NotFound` if an update targets a nonexistent post
    pub async fn save_post(&self, input: SavePostInput) -> Result<Post, PostServiceError> {
        validate_save_input(&input)?;

        let saved = if input.is_create() {
            let url_id = generate_url_id(&input.title);
            if url_id.is_empty() {
                return Err(PostServiceError::ValidationError(
                    "Title must contain at least one letter or digit".to_string(),
                ));
            }

            if self
                .posts
                .exists_url_id(&url_id)
                .await
                .context("Failed to check slug uniqueness")?
            {
                return Err(PostServiceError::DuplicateUrlId(url_id));
            }

            let record = NewPost {
                url_id,
                title: input.title,
                description: input.description,
                content: input.content,
                image_url: input.image_url,
                category: input.category,
                tags: input.tags,
                date: Utc::now(),
                // New posts always go live; hiding is a follow-up action
                active: true,
            };

            self.posts
                .insert(&record)
                .await
                .context("Failed to create post")?
        } else {
            self.posts
                .update(input.id, &input)
                .await
                .context("Failed to update post")?
                .ok_or_else(|| {
                    PostServiceError::NotFound(format!("Post with ID {} not found", input.id))
                })?
        };

        self.invalidate_post_cache().await;
        Ok(saved)
    }

    /// Flip a post's visibility flag
    pub async fn toggle_active(&self, id: i64) -> Result<Post, PostServiceError> {
        let post = self
            .posts
            .toggle_active(id)
            .await
            .context("Failed to toggle post visibility")?
            .ok_or_else(|| PostServiceError::NotFound(format!("Post with ID {} not found", id)))?;

        self.invalidate_post_cache().await;
        Ok(post)
    }

    /// Increment a post's view counter by one, returning the new count.
    ///
    /// Every call counts a view. Deduplicating page refreshes is the
    /// caller's concern.
    pub async fn increment_views(&self, id: i64) -> Result<i64, PostServiceError> {
        let views = self
            .posts
            .increment_views(id)
            .await
            .context("Failed to increment view counter")?
            .ok_or_else(|| PostServiceError::NotFound(format!("Post with ID {} not found", id)))?;

        self.invalidate_post_cache().await;
        Ok(views)
    }

    /// Toggle a like for a (post, viewer IP) pair.
    ///
    /// A viewer who has not liked the post likes it; a viewer who has un-likes
    /// it. The returned count is re-read from storage so it reflects the like
    /// rows, not an in-memory guess.
    pub async fn toggle_like(
        &self,
        post_id: i64,
        viewer_ip: &str,
    ) -> Result<LikeToggle, PostServiceError> {
        self.posts
            .get_by_id(post_id)
            .await
            .context("Failed to get post")?
            .ok_or_else(|| {
                PostServiceError::NotFound(format!("Post with ID {} not found", post_id))
            })?;

        let already_liked = self
            .likes
            .is_liked(post_id, viewer_ip)
            .await
            .context("Failed to check like state")?;

        if already_liked {
            self.likes
                .remove_like(post_id, viewer_ip)
                .await
                .context("Failed to remove like")?;
        } else {
            self.likes
                .add_like(post_id, viewer_ip)
                .await
                .context("Failed to add like")?;
        }

        let like_count = self
            .likes
            .count_for_post(post_id)
            .await
            .context("Failed to count likes")?;

        self.invalidate_post_cache().await;

        Ok(LikeToggle {
            liked: !already_liked,
            like_count,
        })
    }

    /// Render markdown content to HTML
    pub fn render_markdown(&self, content: &str) -> String {
        self.markdown.render(content)
    }

    async fn snapshot(&self) -> Result<Vec<Post>, PostServiceError> {
        if let Some(posts) = self
            .cache
            .get::<Vec<Post>>(CACHE_KEY_ALL_POSTS)
            .await
            .ok()
            .flatten()
        {
            return Ok(posts);
        }

        let posts = self
            .posts
            .list_all()
            .await
            .context("Failed to load posts")?;

        let _ = self.cache.set(CACHE_KEY_ALL_POSTS, &posts).await;
        Ok(posts)
    }

    async fn invalidate_post_cache(&self) {
        let _ = self.cache.delete_pattern(CACHE_PATTERN_POSTS).await;
    }
}

/// Validate the editable fields of a save request.
///
/// Matches the admin form's rules; the service re-checks them because server
/// validation is authoritative. Category is only demanded on create so that
/// older posts without one stay editable.
fn validate_save_input(input: &SavePostInput) -> Result<(), PostServiceError> {
    if input.title.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "Title is required".to_string(),
        ));
    }

    if input.description.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "Description is required".to_string(),
        ));
    }
    if input.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(PostServiceError::ValidationError(format!(
            "Description is too long. Maximum is {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }

    if input.content.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "Content is required".to_string(),
        ));
    }

    if input.image_url.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "Image URL is required".to_string(),
        ));
    }
    if !IMAGE_URL_PATTERN.is_match(&input.image_url) {
        return Err(PostServiceError::ValidationError(
            "Image URL is not a valid URL".to_string(),
        ));
    }

    if input.tags.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "At least one tag is required".to_string(),
        ));
    }

    if input.is_create() && input.category.trim().is_empty() {
        return Err(PostServiceError::ValidationError(
            "Category is required".to_string(),
        ));
    }

    Ok(())
}

/// Generate a URL slug from a post title.
///
/// Every run of non-alphanumeric characters becomes a single hyphen; the
/// result is lowercase, uses only `[a-z0-9-]` and never starts or ends with
/// a hyphen. The same title always yields the same slug.
pub fn generate_url_id(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen && !slug.is_empty() {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}
