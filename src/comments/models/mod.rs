pub mod comment;
