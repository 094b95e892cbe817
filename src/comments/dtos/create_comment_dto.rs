use serde::Deserialize;
use validator::Validate;

/// Any `post` field in the body is ignored; the parent comes from the path.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "author must be between 1 and 50 characters."
    ))]
    pub author: String,
    #[validate(length(min = 1, message = "content must not be blank."))]
    pub content: String,
}
