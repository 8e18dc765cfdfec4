//! Route definitions for blog posts and block-level content editing.
//!
//! Registered under `/posts`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Post routes, registered as `/posts`.
///
/// ```text
/// GET    /                            list_posts
/// POST   /                            create_post
/// GET    /{id}                        get_post
/// PUT    /{id}                        update_post
/// DELETE /{id}                        delete_post
/// GET    /{id}/rendered               render_post
/// POST   /{id}/blocks                 insert_block
/// PUT    /{id}/blocks                 reorder_blocks
/// POST   /{id}/blocks/move            move_block
/// PUT    /{id}/blocks/{index}         update_block
/// DELETE /{id}/blocks/{index}         delete_block
/// POST   /{id}/blocks/{index}/duplicate  duplicate_block
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/rendered", get(posts::render_post))
        .route(
            "/{id}/blocks",
            post(posts::insert_block).put(posts::reorder_blocks),
        )
        .route("/{id}/blocks/move", post(posts::move_block))
        .route(
            "/{id}/blocks/{index}",
            put(posts::update_block).delete(posts::delete_block),
        )
        .route(
            "/{id}/blocks/{index}/duplicate",
            post(posts::duplicate_block),
        )
}
