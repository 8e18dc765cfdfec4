//! Handlers for blog posts and their block-based content.
//!
//! Post CRUD persists whole documents; the block-editing endpoints load a
//! post, apply one editor operation to the in-memory sequence, and save
//! the whole sequence back. Rendering resolves product references against
//! the catalog and returns HTML.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use verdia_core::blog::{
    clamp_limit, clamp_offset, seed_from_legacy, validate_author, validate_excerpt,
    validate_status, validate_title, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, STATUS_PUBLISHED,
};
use verdia_core::catalog::ProductSummary;
use verdia_core::content::block::{validate_block, validate_blocks, Block, BlockKind};
use verdia_core::content::editor::BlockEditor;
use verdia_core::content::render::{referenced_product_ids, render_to_html};
use verdia_core::error::CoreError;
use verdia_core::types::DbId;
use verdia_db::models::post::{CreatePost, Post, RenderedPost, UpdatePost};
use verdia_db::repositories::{PostRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query and body param types
-------------------------------------------------------------------------- */

#[derive(Debug, serde::Deserialize)]
pub struct ListPostsParams {
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RenderParams {
    /// Allow rendering drafts (admin preview).
    #[serde(default)]
    pub draft: bool,
}

/// Body for inserting a new block: a wire type tag plus an optional
/// splice position (default: end).
#[derive(Debug, serde::Deserialize)]
pub struct InsertBlockRequest {
    #[serde(rename = "type")]
    pub block_type: String,
    pub at: Option<usize>,
}

#[derive(Debug, serde::Deserialize)]
pub struct MoveBlockRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, serde::Deserialize)]
pub struct ReorderBlocksRequest {
    pub blocks: Vec<Block>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn post_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Post",
        id: id.to_string(),
    })
}

/// Fetch a post by id or return 404.
async fn ensure_post(pool: &sqlx::PgPool, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| post_not_found(id))
}

/// Persist an edited block sequence and return the updated post.
async fn save_blocks(pool: &sqlx::PgPool, id: DbId, editor: BlockEditor) -> AppResult<Post> {
    PostRepo::set_blocks(pool, id, editor.blocks())
        .await?
        .ok_or_else(|| post_not_found(id))
}

/* --------------------------------------------------------------------------
Post CRUD
-------------------------------------------------------------------------- */

/// GET /posts
///
/// List posts with optional status/featured filtering.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status).map_err(AppError::Core)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let posts = PostRepo::list_filtered(
        &state.pool,
        params.status.as_deref(),
        params.featured,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: posts }))
}

/// POST /posts
///
/// Create a new post. The block sequence comes from an explicit `blocks`
/// field, is seeded from `legacyContent`, or starts empty.
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_author(&input.author).map_err(AppError::Core)?;
    if let Some(ref excerpt) = input.excerpt {
        validate_excerpt(excerpt).map_err(AppError::Core)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status).map_err(AppError::Core)?;
    }

    let blocks = match (&input.blocks, &input.legacy_content) {
        (Some(blocks), _) => blocks.clone(),
        (None, Some(legacy)) => seed_from_legacy(legacy),
        (None, None) => Vec::new(),
    };
    validate_blocks(&blocks).map_err(AppError::Core)?;

    let post = PostRepo::create(&state.pool, &input, &blocks).await?;

    tracing::info!(post_id = post.id, title = %post.title, "Post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /posts/{id}
///
/// Patch post metadata; a present `blocks` field overwrites the whole
/// sequence.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref excerpt) = input.excerpt {
        validate_excerpt(excerpt).map_err(AppError::Core)?;
    }
    if let Some(ref author) = input.author {
        validate_author(author).map_err(AppError::Core)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status).map_err(AppError::Core)?;
    }
    if let Some(ref blocks) = input.blocks {
        validate_blocks(blocks).map_err(AppError::Core)?;
    }

    let post = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    tracing::info!(post_id = id, "Post updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PostRepo::delete(&state.pool, id).await? {
        return Err(post_not_found(id));
    }

    tracing::info!(post_id = id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Block editing
-------------------------------------------------------------------------- */

/// POST /posts/{id}/blocks
///
/// Insert a new block of the given type at an optional position. An
/// unrecognized type tag falls back to an empty text block (legacy editor
/// compatibility).
pub async fn insert_block(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InsertBlockRequest>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);

    // Lenient tag handling for older editor clients: unrecognized tags
    // fall back to an empty text block.
    let kind = BlockKind::from_tag(&input.block_type).unwrap_or(BlockKind::Text);
    editor.insert(kind, input.at);

    let updated = save_blocks(&state.pool, id, editor).await?;

    tracing::info!(post_id = id, block_type = %input.block_type, "Block inserted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: updated })))
}

/// PUT /posts/{id}/blocks
///
/// Bulk-replace the block sequence (drag-and-drop reorder). The caller
/// guarantees the new sequence is a permutation of the same blocks.
pub async fn reorder_blocks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReorderBlocksRequest>,
) -> AppResult<impl IntoResponse> {
    validate_blocks(&input.blocks).map_err(AppError::Core)?;

    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);
    editor.reorder(input.blocks);

    let updated = save_blocks(&state.pool, id, editor).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /posts/{id}/blocks/{index}
///
/// Replace the block at an index wholesale. The replacement must be the
/// same variant; a mismatched or out-of-range update is silently ignored
/// (best-effort editor semantics).
pub async fn update_block(
    State(state): State<AppState>,
    Path((id, index)): Path<(DbId, usize)>,
    Json(block): Json<Block>,
) -> AppResult<impl IntoResponse> {
    validate_block(&block).map_err(AppError::Core)?;

    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);
    editor.update(index, block);

    let updated = save_blocks(&state.pool, id, editor).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /posts/{id}/blocks/{index}
pub async fn delete_block(
    State(state): State<AppState>,
    Path((id, index)): Path<(DbId, usize)>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);
    editor.delete(index);

    let updated = save_blocks(&state.pool, id, editor).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /posts/{id}/blocks/{index}/duplicate
///
/// Clone the block at an index under a fresh id, inserted immediately
/// after the source.
pub async fn duplicate_block(
    State(state): State<AppState>,
    Path((id, index)): Path<(DbId, usize)>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);
    editor.duplicate(index);

    let updated = save_blocks(&state.pool, id, editor).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /posts/{id}/blocks/move
///
/// Relocate a block. Out-of-range indices are silently ignored.
pub async fn move_block(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveBlockRequest>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    let mut editor = BlockEditor::new(post.blocks.0);
    editor.move_block(input.from, input.to);

    let updated = save_blocks(&state.pool, id, editor).await?;
    Ok(Json(DataResponse { data: updated }))
}

/* --------------------------------------------------------------------------
Rendering
-------------------------------------------------------------------------- */

/// GET /posts/{id}/rendered
///
/// Render a post's block sequence to HTML, resolving product references
/// against the catalog. Draft posts 404 unless `?draft=true`.
pub async fn render_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RenderParams>,
) -> AppResult<impl IntoResponse> {
    let post = ensure_post(&state.pool, id).await?;
    if post.status != STATUS_PUBLISHED && !params.draft {
        return Err(post_not_found(id));
    }

    let ids = referenced_product_ids(&post.blocks.0);
    let resolver: HashMap<String, ProductSummary> =
        ProductRepo::find_many_by_ids(&state.pool, &ids)
            .await?
            .iter()
            .map(|product| (product.id.clone(), product.summary()))
            .collect();

    let html = render_to_html(&post.blocks.0, &resolver);

    Ok(Json(DataResponse {
        data: RenderedPost {
            id: post.id,
            title: post.title,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            author: post.author,
            status: post.status,
            html,
        },
    }))
}
