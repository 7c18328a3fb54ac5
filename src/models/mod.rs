//! Data models
//!
//! This module contains all data structures used throughout the Pressa blog engine.
//! Models represent:
//! - Database entities (Post, Like, Session)
//! - Listing criteria and paged results
//! - Internal data transfer objects

mod like;
mod post;
mod query;
mod session;

pub use like::{Like, LikeToggle};
pub use post::{NewPost, Post, SavePostInput};
pub use query::{DateFilter, Pagination, PostPage, PostQuery, SortKey};
pub use session::Session;
