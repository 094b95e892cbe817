pub mod create_post_dto;
pub mod edit_post_dto;
