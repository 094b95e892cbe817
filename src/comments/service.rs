use crate::{
    app::models::api_error::ApiError, posts::errors::PostsApiError, AppState,
};

use super::{
    dtos::{create_comment_dto::CreateCommentDto, edit_comment_dto::EditCommentDto},
    errors::CommentsApiError,
    models::comment::Comment,
};

/// Comments under `post_id`, newest first. An unknown post yields an empty
/// list rather than an error.
pub async fn get_comments(post_id: i64, state: &AppState) -> Result<Vec<Comment>, ApiError> {
    state.comments.get_comments_by_post_id(post_id).await
}

pub async fn create_comment(
    post_id: i64,
    dto: &CreateCommentDto,
    state: &AppState,
) -> Result<Comment, ApiError> {
    if state.posts.get_post_by_id(post_id).await?.is_none() {
        return Err(PostsApiError::PostNotFound.value());
    }

    let comment = state
        .comments
        .create_comment(post_id, &dto.author, &dto.content)
        .await?;

    tracing::info!(id = comment.id, post_id, %comment, "comment created");

    Ok(comment)
}

pub async fn get_comment_by_id(
    post_id: i64,
    id: i64,
    state: &AppState,
) -> Result<Comment, ApiError> {
    match state.comments.get_comment_by_id(post_id, id).await? {
        Some(comment) => Ok(comment),
        None => Err(CommentsApiError::CommentNotFound.value()),
    }
}

pub async fn edit_comment_by_id(
    post_id: i64,
    id: i64,
    dto: &EditCommentDto,
    state: &AppState,
) -> Result<Comment, ApiError> {
    let edited = state
        .comments
        .edit_comment_by_id(post_id, id, dto.author.as_deref(), dto.content.as_deref())
        .await?;

    match edited {
        Some(comment) => {
            tracing::info!(id, post_id, %comment, "comment edited");
            Ok(comment)
        }
        None => Err(CommentsApiError::CommentNotFound.value()),
    }
}

pub async fn delete_comment_by_id(post_id: i64, id: i64, state: &AppState) -> Result<(), ApiError> {
    match state.comments.delete_comment_by_id(post_id, id).await? {
        true => {
            tracing::info!(id, post_id, "comment deleted");
            Ok(())
        }
        false => Err(CommentsApiError::CommentNotFound.value()),
    }
}
