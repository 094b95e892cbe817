use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "title must be between 1 and 100 characters."
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be blank."))]
    pub content: String,
}
