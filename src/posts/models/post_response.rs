use serde::Serialize;

use crate::comments::models::comment::Comment;

use super::post::Post;

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub comments: Vec<Comment>,
}

impl PostResponse {
    pub fn from_post(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            comments,
        }
    }
}
