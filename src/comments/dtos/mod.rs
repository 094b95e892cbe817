pub mod create_comment_dto;
pub mod edit_comment_dto;
pub mod nested_comment_dto;
