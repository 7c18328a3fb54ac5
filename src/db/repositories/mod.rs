//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod like;
pub mod post;
pub mod session;

pub use like::{LikeRepository, SqlxLikeRepository};
pub use post::{PostRepository, SqlxPostRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
