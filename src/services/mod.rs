//! Services layer - Business logic
//!
//! This module contains the business logic of the blog platform.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories and cache
//! - Handling validation and error cases

pub mod archive;
pub mod auth;
pub mod markdown;
pub mod password;
pub mod post;
pub mod query;

pub use archive::{history, tag_cloud, MonthCount, TagCount};
pub use auth::{AuthService, AuthServiceError};
pub use markdown::MarkdownRenderer;
pub use password::{hash_password, verify_password};
pub use post::{generate_url_id, PostService, PostServiceError};
