pub mod post;
pub mod post_response;
