use std::collections::HashMap;

use crate::{
    app::models::api_error::ApiError,
    comments::{
        dtos::nested_comment_dto::NestedCommentDto, errors::CommentsApiError,
        models::comment::Comment,
    },
    AppState,
};

use super::{
    dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
    errors::PostsApiError,
    models::{post::Post, post_response::PostResponse},
};

pub async fn create_post(dto: &CreatePostDto, state: &AppState) -> Result<PostResponse, ApiError> {
    let post = state.posts.create_post(&dto.title, &dto.content).await?;

    tracing::info!(id = post.id, %post, "post created");

    Ok(PostResponse::from_post(post, Vec::new()))
}

pub async fn get_posts(state: &AppState) -> Result<Vec<PostResponse>, ApiError> {
    let posts = state.posts.get_posts().await?;
    let post_ids: Vec<i64> = posts.iter().map(|post| post.id).collect();

    let mut comments_by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in state.comments.get_comments_by_post_ids(&post_ids).await? {
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(comment);
    }

    Ok(posts
        .into_iter()
        .map(|post| {
            let comments = comments_by_post.remove(&post.id).unwrap_or_default();
            PostResponse::from_post(post, comments)
        })
        .collect())
}

pub async fn get_post_by_id(id: i64, state: &AppState) -> Result<PostResponse, ApiError> {
    match state.posts.get_post_by_id(id).await? {
        Some(post) => with_comments(post, state).await,
        None => Err(PostsApiError::PostNotFound.value()),
    }
}

/// Applies the post fields, then upserts the submitted comments one by one.
///
/// Each comment write is its own statement. If an element fails, the
/// comments written before it stay written.
pub async fn edit_post_by_id(
    id: i64,
    dto: &EditPostDto,
    state: &AppState,
) -> Result<PostResponse, ApiError> {
    let Some(post) = state
        .posts
        .edit_post_by_id(id, dto.title.as_deref(), dto.content.as_deref())
        .await?
    else {
        return Err(PostsApiError::PostNotFound.value());
    };

    if let Some(comments) = &dto.comments {
        merge_comments(post.id, comments, state).await?;
    }

    tracing::info!(id = post.id, %post, "post edited");

    with_comments(post, state).await
}

pub async fn delete_post_by_id(id: i64, state: &AppState) -> Result<(), ApiError> {
    match state.posts.delete_post_by_id(id).await? {
        true => {
            tracing::info!(id, "post deleted");
            Ok(())
        }
        false => Err(PostsApiError::PostNotFound.value()),
    }
}

async fn with_comments(post: Post, state: &AppState) -> Result<PostResponse, ApiError> {
    let comments = state.comments.get_comments_by_post_ids(&[post.id]).await?;

    Ok(PostResponse::from_post(post, comments))
}

async fn merge_comments(
    post_id: i64,
    comments: &[NestedCommentDto],
    state: &AppState,
) -> Result<(), ApiError> {
    for dto in comments {
        match dto.id {
            Some(comment_id) => {
                let Some(comment) = state
                    .comments
                    .edit_comment_by_id(
                        post_id,
                        comment_id,
                        dto.author.as_deref(),
                        dto.content.as_deref(),
                    )
                    .await?
                else {
                    tracing::warn!(post_id, comment_id, "nested comment not found under post");
                    return Err(CommentsApiError::CommentNotFound.value());
                };

                tracing::info!(id = comment.id, post_id, %comment, "comment edited");
            }
            None => {
                let (Some(author), Some(content)) = (&dto.author, &dto.content) else {
                    return Err(CommentsApiError::MissingFields.value());
                };

                let comment = state.comments.create_comment(post_id, author, content).await?;

                tracing::info!(id = comment.id, post_id, %comment, "comment created");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;

    fn edit(value: serde_json::Value) -> EditPostDto {
        serde_json::from_value(value).unwrap()
    }

    async fn seeded() -> (AppState, Post, Comment) {
        let state = AppState::in_memory();
        let post = state.posts.create_post("title", "content").await.unwrap();
        let comment = state
            .comments
            .create_comment(post.id, "ann", "first")
            .await
            .unwrap();

        (state, post, comment)
    }

    #[tokio::test]
    async fn edit_without_comments_leaves_comments_alone() {
        let (state, post, comment) = seeded().await;

        let response = edit_post_by_id(post.id, &edit(json!({ "title": "renamed" })), &state)
            .await
            .unwrap();

        assert_eq!(response.title, "renamed");
        assert_eq!(response.content, "content");
        assert_eq!(response.comments.len(), 1);
        assert_eq!(response.comments[0].content, comment.content);
    }

    #[tokio::test]
    async fn nested_comment_with_id_is_edited_in_place() {
        let (state, post, comment) = seeded().await;

        let response = edit_post_by_id(
            post.id,
            &edit(json!({ "comments": [{ "id": comment.id, "content": "edited" }] })),
            &state,
        )
        .await
        .unwrap();

        assert_eq!(response.comments.len(), 1);
        assert_eq!(response.comments[0].id, comment.id);
        assert_eq!(response.comments[0].author, "ann");
        assert_eq!(response.comments[0].content, "edited");
        assert_eq!(response.comments[0].created_at, comment.created_at);
    }

    #[tokio::test]
    async fn nested_comment_without_id_is_created() {
        let (state, post, comment) = seeded().await;

        let response = edit_post_by_id(
            post.id,
            &edit(json!({ "comments": [{ "author": "bob", "content": "second" }] })),
            &state,
        )
        .await
        .unwrap();

        assert_eq!(response.comments.len(), 2);
        assert_eq!(response.comments[0].id, comment.id);
        assert_eq!(response.comments[1].author, "bob");
        assert_eq!(response.comments[1].post_id, post.id);
    }

    #[tokio::test]
    async fn empty_comment_list_changes_nothing() {
        let (state, post, _) = seeded().await;

        let response = edit_post_by_id(post.id, &edit(json!({ "comments": [] })), &state)
            .await
            .unwrap();

        assert_eq!(response.comments.len(), 1);
    }

    #[tokio::test]
    async fn foreign_comment_id_fails_after_earlier_writes() {
        let (state, post, comment) = seeded().await;
        let other = state.posts.create_post("other", "post").await.unwrap();
        let foreign = state
            .comments
            .create_comment(other.id, "eve", "elsewhere")
            .await
            .unwrap();

        let err = edit_post_by_id(
            post.id,
            &edit(json!({
                "comments": [
                    { "id": comment.id, "content": "applied" },
                    { "id": foreign.id, "content": "hijack" },
                    { "author": "never", "content": "reached" }
                ]
            })),
            &state,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, StatusCode::NOT_FOUND);

        let kept = state
            .comments
            .get_comment_by_id(post.id, comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.content, "applied");

        let untouched = state
            .comments
            .get_comment_by_id(other.id, foreign.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.content, "elsewhere");

        let post = get_post_by_id(post.id, &state).await.unwrap();
        assert_eq!(post.comments.len(), 1);
    }

    #[tokio::test]
    async fn editing_missing_post_is_not_found() {
        let state = AppState::in_memory();

        let err = edit_post_by_id(9, &edit(json!({ "title": "x" })), &state)
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_posts_nests_each_posts_comments() {
        let (state, first, _) = seeded().await;
        let second = state.posts.create_post("second", "post").await.unwrap();
        state
            .comments
            .create_comment(second.id, "bob", "a")
            .await
            .unwrap();
        state
            .comments
            .create_comment(second.id, "bob", "b")
            .await
            .unwrap();

        let posts = get_posts(&state).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, first.id);
        assert_eq!(posts[0].comments.len(), 1);
        assert_eq!(posts[1].comments.len(), 2);
        assert!(posts[1].comments.iter().all(|c| c.post_id == second.id));
    }
}
