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
    dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
    errors::PostsApiError,
    models::post_response::PostResponse,
    service,
};

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<CreatePostDto>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    dto.validate()?;

    let post = service::create_post(&dto, &state).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    match service::get_posts(&state).await {
        Ok(posts) => Ok(Json(posts)),
        Err(e) => Err(e),
    }
}

pub async fn get_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    match service::get_post_by_id(id, &state).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

pub async fn replace_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonFromRequest(dto): JsonFromRequest<EditPostDto>,
) -> Result<Json<PostResponse>, ApiError> {
    if !dto.has_all_fields() {
        return Err(PostsApiError::MissingFields.value());
    }
    dto.validate_all()?;

    let post = service::edit_post_by_id(id, &dto, &state).await?;
    Ok(Json(post))
}

pub async fn edit_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonFromRequest(dto): JsonFromRequest<EditPostDto>,
) -> Result<Json<PostResponse>, ApiError> {
    dto.validate_all()?;

    let post = service::edit_post_by_id(id, &dto, &state).await?;
    Ok(Json(post))
}

pub async fn delete_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service::delete_post_by_id(id, &state).await?;
    Ok(StatusCode::NO_CONTENT)
}
