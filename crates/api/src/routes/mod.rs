pub mod health;
pub mod posts;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /posts                             list, create
/// /posts/{id}                        get, update, delete
/// /posts/{id}/rendered               server-side render (GET)
/// /posts/{id}/blocks                 insert block (POST), reorder (PUT)
/// /posts/{id}/blocks/move            move block (POST)
/// /posts/{id}/blocks/{index}         update (PUT), delete (DELETE)
/// /posts/{id}/blocks/{index}/duplicate  duplicate block (POST)
///
/// /products                          list, create
/// /products/{id}                     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Blog posts and block-based content editing.
        .nest("/posts", posts::router())
        // Product catalog (weak-reference target for product blocks).
        .nest("/products", products::router())
}
