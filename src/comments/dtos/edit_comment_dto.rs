use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct EditCommentDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "author must be between 1 and 50 characters."
    ))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "content must not be blank."))]
    pub content: Option<String>,
}

impl EditCommentDto {
    pub fn has_all_fields(&self) -> bool {
        self.author.is_some() && self.content.is_some()
    }
}
