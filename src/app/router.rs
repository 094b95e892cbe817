use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{comments, posts, AppState};

use super::controller;

const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .envy
        .body_limit_bytes
        .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]);

    Router::new()
        .route("/", get(controller::get_root))
        // posts
        .route(
            "/posts/",
            get(posts::controller::get_posts).post(posts::controller::create_post),
        )
        .route(
            "/posts/:post_id/",
            get(posts::controller::get_post_by_id)
                .put(posts::controller::replace_post_by_id)
                .patch(posts::controller::edit_post_by_id)
                .delete(posts::controller::delete_post_by_id),
        )
        // comments
        .route(
            "/posts/:post_id/comments/",
            get(comments::controller::get_comments).post(comments::controller::create_comment),
        )
        .route(
            "/posts/:post_id/comments/:id/",
            get(comments::controller::get_comment_by_id)
                .put(comments::controller::replace_comment_by_id)
                .patch(comments::controller::edit_comment_by_id)
                .delete(comments::controller::delete_comment_by_id),
        )
        // layers
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
