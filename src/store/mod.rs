//! Repository interfaces for posts and comments.
//!
//! Handlers only talk to the stores through these traits. [`PgStore`] is the
//! Postgres backend, [`MemoryStore`] keeps everything in process and backs the
//! service when no database is configured.

use async_trait::async_trait;

use crate::{
    app::models::api_error::ApiError, comments::models::comment::Comment,
    posts::models::post::Post,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts a post and returns it with its assigned id.
    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError>;

    /// All posts, oldest id first.
    async fn get_posts(&self) -> Result<Vec<Post>, ApiError>;

    async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, ApiError>;

    /// Overwrites the fields that are `Some` and refreshes `updated_at`.
    /// Returns `None` when the post does not exist.
    async fn edit_post_by_id(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, ApiError>;

    /// Removes the post together with all of its comments. Returns whether a
    /// post was removed.
    async fn delete_post_by_id(&self, id: i64) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fails with `PostNotFound` when `post_id` does not reference a post.
    async fn create_comment(
        &self,
        post_id: i64,
        author: &str,
        content: &str,
    ) -> Result<Comment, ApiError>;

    /// Comments of one post, newest first.
    async fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, ApiError>;

    /// Comments of several posts, oldest id first.
    async fn get_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>, ApiError>;

    async fn get_comment_by_id(&self, post_id: i64, id: i64) -> Result<Option<Comment>, ApiError>;

    async fn edit_comment_by_id(
        &self,
        post_id: i64,
        id: i64,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Comment>, ApiError>;

    async fn delete_comment_by_id(&self, post_id: i64, id: i64) -> Result<bool, ApiError>;
}
