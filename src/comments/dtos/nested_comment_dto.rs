use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// A comment element inside a post edit. With an id it edits that comment,
/// without one it creates a new comment under the post.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_new_comment_fields"))]
pub struct NestedCommentDto {
    pub id: Option<i64>,
    #[validate(length(
        min = 1,
        max = 50,
        message = "author must be between 1 and 50 characters."
    ))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "content must not be blank."))]
    pub content: Option<String>,
}

fn validate_new_comment_fields(dto: &NestedCommentDto) -> Result<(), ValidationError> {
    if dto.id.is_none() && (dto.author.is_none() || dto.content.is_none()) {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::from(
            "new comments require both author and content.",
        ));
        return Err(error);
    }

    Ok(())
}
