use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum PostsApiError {
    PostNotFound,
    MissingFields,
}

impl PostsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::PostNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Post not found.".to_string(),
            },
            Self::MissingFields => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "title and content are required.".to_string(),
            },
        }
    }
}
