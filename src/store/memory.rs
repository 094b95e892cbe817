//! In-memory store.
//!
//! Rows live in ordered maps behind a single lock, so ids come back in
//! insertion order and deleting a post can drop its comments in the same
//! critical section.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError, util::time},
    comments::models::comment::Comment,
    posts::{errors::PostsApiError, models::post::Post},
};

use super::{CommentStore, PostStore};

#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    next_post_id: i64,
    next_comment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryData>, ApiError> {
        self.data.read().map_err(|e| {
            tracing::error!("memory store lock poisoned: {}", e);
            DefaultApiError::InternalServerError.value()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryData>, ApiError> {
        self.data.write().map_err(|e| {
            tracing::error!("memory store lock poisoned: {}", e);
            DefaultApiError::InternalServerError.value()
        })
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError> {
        let mut data = self.write()?;
        data.next_post_id += 1;

        let mut post = Post::new(title, content);
        post.id = data.next_post_id;
        data.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.read()?.posts.values().cloned().collect())
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, ApiError> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn edit_post_by_id(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, ApiError> {
        let mut data = self.write()?;
        let Some(post) = data.posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            post.title = title.to_string();
        }
        if let Some(content) = content {
            post.content = content.to_string();
        }
        post.updated_at = time::current_time_in_millis();

        Ok(Some(post.clone()))
    }

    async fn delete_post_by_id(&self, id: i64) -> Result<bool, ApiError> {
        let mut data = self.write()?;
        if data.posts.remove(&id).is_none() {
            return Ok(false);
        }

        data.comments.retain(|_, comment| comment.post_id != id);

        Ok(true)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(
        &self,
        post_id: i64,
        author: &str,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let mut data = self.write()?;
        if !data.posts.contains_key(&post_id) {
            return Err(PostsApiError::PostNotFound.value());
        }
        data.next_comment_id += 1;

        let mut comment = Comment::new(post_id, author, content);
        comment.id = data.next_comment_id;
        data.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let mut comments: Vec<Comment> = self
            .read()?
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();

        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(comments)
    }

    async fn get_comments_by_post_ids(&self, post_ids: &[i64]) -> Result<Vec<Comment>, ApiError> {
        Ok(self
            .read()?
            .comments
            .values()
            .filter(|comment| post_ids.contains(&comment.post_id))
            .cloned()
            .collect())
    }

    async fn get_comment_by_id(&self, post_id: i64, id: i64) -> Result<Option<Comment>, ApiError> {
        Ok(self
            .read()?
            .comments
            .get(&id)
            .filter(|comment| comment.post_id == post_id)
            .cloned())
    }

    async fn edit_comment_by_id(
        &self,
        post_id: i64,
        id: i64,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Comment>, ApiError> {
        let mut data = self.write()?;
        let Some(comment) = data
            .comments
            .get_mut(&id)
            .filter(|comment| comment.post_id == post_id)
        else {
            return Ok(None);
        };

        if let Some(author) = author {
            comment.author = author.to_string();
        }
        if let Some(content) = content {
            comment.content = content.to_string();
        }
        comment.updated_at = time::current_time_in_millis();

        Ok(Some(comment.clone()))
    }

    async fn delete_comment_by_id(&self, post_id: i64, id: i64) -> Result<bool, ApiError> {
        let mut data = self.write()?;
        let belongs_to_post = data
            .comments
            .get(&id)
            .map_or(false, |comment| comment.post_id == post_id);

        if belongs_to_post {
            data.comments.remove(&id);
        }

        Ok(belongs_to_post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryStore::new();

        let first = store.create_post("a", "b").await.unwrap();
        let second = store.create_post("c", "d").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn deleting_a_post_drops_its_comments_only() {
        let store = MemoryStore::new();
        let kept = store.create_post("kept", "x").await.unwrap();
        let doomed = store.create_post("doomed", "x").await.unwrap();
        let survivor = store.create_comment(kept.id, "ann", "hi").await.unwrap();
        let first = store.create_comment(doomed.id, "bob", "one").await.unwrap();
        let second = store.create_comment(doomed.id, "bob", "two").await.unwrap();

        assert!(store.delete_post_by_id(doomed.id).await.unwrap());

        assert!(store.get_comment_by_id(doomed.id, first.id).await.unwrap().is_none());
        assert!(store.get_comment_by_id(doomed.id, second.id).await.unwrap().is_none());
        assert!(store.get_comment_by_id(kept.id, survivor.id).await.unwrap().is_some());
        assert!(!store.delete_post_by_id(doomed.id).await.unwrap());
    }

    #[tokio::test]
    async fn comment_lookups_are_scoped_to_the_post() {
        let store = MemoryStore::new();
        let post = store.create_post("a", "b").await.unwrap();
        let other = store.create_post("c", "d").await.unwrap();
        let comment = store.create_comment(post.id, "ann", "hi").await.unwrap();

        assert!(store.get_comment_by_id(other.id, comment.id).await.unwrap().is_none());
        assert!(store
            .edit_comment_by_id(other.id, comment.id, Some("eve"), None)
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_comment_by_id(other.id, comment.id).await.unwrap());
        assert!(store.get_comment_by_id(post.id, comment.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_rejected() {
        let store = MemoryStore::new();

        let err = store.create_comment(42, "ann", "hi").await.unwrap_err();

        assert_eq!(err.code, axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_comments_are_newest_first() {
        let store = MemoryStore::new();
        let post = store.create_post("a", "b").await.unwrap();
        let older = store.create_comment(post.id, "ann", "first").await.unwrap();
        let newer = store.create_comment(post.id, "bob", "second").await.unwrap();

        // Force distinct timestamps regardless of clock resolution.
        {
            let mut data = store.data.write().unwrap();
            data.comments.get_mut(&older.id).unwrap().created_at = 1_000;
            data.comments.get_mut(&newer.id).unwrap().created_at = 2_000;
        }

        let ids: Vec<i64> = store
            .get_comments_by_post_id(post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn edit_keeps_created_at() {
        let store = MemoryStore::new();
        let post = store.create_post("a", "b").await.unwrap();

        let edited = store
            .edit_post_by_id(post.id, Some("new"), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(edited.title, "new");
        assert_eq!(edited.content, "b");
        assert_eq!(edited.created_at, post.created_at);
        assert!(edited.updated_at >= post.updated_at);
    }
}
