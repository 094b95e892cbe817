use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum CommentsApiError {
    CommentNotFound,
    MissingFields,
}

impl CommentsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::CommentNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Comment not found.".to_string(),
            },
            Self::MissingFields => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "author and content are required.".to_string(),
            },
        }
    }
}
