use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    app::{models::api_error::ApiError, structs::json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::{create_comment_dto::CreateCommentDto, edit_comment_dto::EditCommentDto},
    errors::CommentsApiError,
    models::comment::Comment,
    service,
};

pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    match service::get_comments(post_id, &state).await {
        Ok(comments) => Ok(Json(comments)),
        Err(e) => Err(e),
    }
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    JsonFromRequest(dto): JsonFromRequest<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    dto.validate()?;

    let comment = service::create_comment(post_id, &dto, &state).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comment_by_id(
    State(state): State<Arc<AppState>>,
    Path((post_id, id)): Path<(i64, i64)>,
) -> Result<Json<Comment>, ApiError> {
    match service::get_comment_by_id(post_id, id, &state).await {
        Ok(comment) => Ok(Json(comment)),
        Err(e) => Err(e),
    }
}

pub async fn replace_comment_by_id(
    State(state): State<Arc<AppState>>,
    Path((post_id, id)): Path<(i64, i64)>,
    JsonFromRequest(dto): JsonFromRequest<EditCommentDto>,
) -> Result<Json<Comment>, ApiError> {
    if !dto.has_all_fields() {
        return Err(CommentsApiError::MissingFields.value());
    }
    dto.validate()?;

    let comment = service::edit_comment_by_id(post_id, id, &dto, &state).await?;
    Ok(Json(comment))
}

pub async fn edit_comment_by_id(
    State(state): State<Arc<AppState>>,
    Path((post_id, id)): Path<(i64, i64)>,
    JsonFromRequest(dto): JsonFromRequest<EditCommentDto>,
) -> Result<Json<Comment>, ApiError> {
    dto.validate()?;

    let comment = service::edit_comment_by_id(post_id, id, &dto, &state).await?;
    Ok(Json(comment))
}

pub async fn delete_comment_by_id(
    State(state): State<Arc<AppState>>,
    Path((post_id, id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    service::delete_comment_by_id(post_id, id, &state).await?;
    Ok(StatusCode::NO_CONTENT)
}
