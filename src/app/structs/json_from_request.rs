use axum::Json;
use axum_macros::FromRequest;

use crate::app::models::api_error::ApiError;

/// `Json` with its rejections (bad content type, syntax errors, missing
/// fields) rendered as an [`ApiError`] body instead of axum's plain text.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonFromRequest<T>(pub T);
