use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::comments::dtos::nested_comment_dto::NestedCommentDto;

#[derive(Debug, Deserialize, Validate)]
pub struct EditPostDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "title must be between 1 and 100 characters."
    ))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be blank."))]
    pub content: Option<String>,
    /// Upserted against the post's existing comments. Comments left out of
    /// the list are not touched.
    pub comments: Option<Vec<NestedCommentDto>>,
}

impl EditPostDto {
    /// Validates the post fields and every nested comment, so a bad element
    /// anywhere in the list rejects the request before anything is written.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        if let Some(comments) = &self.comments {
            for comment in comments {
                comment.validate()?;
            }
        }

        Ok(())
    }

    pub fn has_all_fields(&self) -> bool {
        self.title.is_some() && self.content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dto(value: serde_json::Value) -> EditPostDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_body_is_a_valid_partial_edit() {
        let dto = dto(json!({}));

        assert!(dto.validate_all().is_ok());
        assert!(dto.comments.is_none());
        assert!(!dto.has_all_fields());
    }

    #[test]
    fn rejects_long_title() {
        let dto = dto(json!({ "title": "x".repeat(101) }));

        assert!(dto.validate_all().is_err());
    }

    #[test]
    fn rejects_new_nested_comment_without_author() {
        let dto = dto(json!({
            "comments": [
                { "id": 1, "content": "fine, it already exists" },
                { "content": "missing author" }
            ]
        }));

        assert!(dto.validate_all().is_err());
    }

    #[test]
    fn accepts_mixed_nested_comments() {
        let dto = dto(json!({
            "title": "updated",
            "content": "body",
            "comments": [
                { "id": 3, "author": "ann" },
                { "author": "bob", "content": "new one" }
            ]
        }));

        assert!(dto.validate_all().is_ok());
        assert!(dto.has_all_fields());
        assert_eq!(dto.comments.map(|c| c.len()), Some(2));
    }
}
