//! Repository for the `posts` table.
//!
//! Post documents are whole-document: the block sequence is one JSONB
//! value, overwritten in full on every save. There are no per-block
//! partial updates at this layer.

use sqlx::types::Json;
use sqlx::PgPool;
use verdia_core::blog::{POST_SCHEMA_VERSION, STATUS_DRAFT};
use verdia_core::content::block::Block;
use verdia_core::types::DbId;

use crate::models::post::{CreatePost, Post, UpdatePost};

/// Column list for `posts` queries.
const COLUMNS: &str = "\
    id, title, excerpt, featured_image, blocks, author, \
    featured, status, schema_version, date, created_at, updated_at";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Create a new post with the given (already seeded) block sequence,
    /// returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePost,
        blocks: &[Block],
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts \
                (title, excerpt, featured_image, blocks, author, \
                 featured, status, schema_version, date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.title)
            .bind(input.excerpt.as_deref().unwrap_or(""))
            .bind(input.featured_image.as_deref().unwrap_or(""))
            .bind(Json(blocks))
            .bind(&input.author)
            .bind(input.featured.unwrap_or(false))
            .bind(input.status.as_deref().unwrap_or(STATUS_DRAFT))
            .bind(POST_SCHEMA_VERSION)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List posts with optional filters for status and the featured flag.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        featured: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if featured.is_some() {
            conditions.push(format!("featured = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM posts {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Post>(&query);

        if let Some(s) = status {
            q = q.bind(s);
        }
        if let Some(f) = featured {
            q = q.bind(f);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Patch a post's metadata and, when present, overwrite the whole block
    /// sequence. Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                title = COALESCE($1, title), \
                excerpt = COALESCE($2, excerpt), \
                featured_image = COALESCE($3, featured_image), \
                blocks = COALESCE($4, blocks), \
                author = COALESCE($5, author), \
                featured = COALESCE($6, featured), \
                status = COALESCE($7, status), \
                date = COALESCE($8, date), \
                updated_at = NOW() \
             WHERE id = $9 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(input.blocks.as_ref().map(Json))
            .bind(&input.author)
            .bind(input.featured)
            .bind(&input.status)
            .bind(input.date)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a post's block sequence (the save half of an editor
    /// operation). Returns the updated row if found.
    pub async fn set_blocks(
        pool: &PgPool,
        id: DbId,
        blocks: &[Block],
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET blocks = $1, updated_at = NOW() \
             WHERE id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(Json(blocks))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
