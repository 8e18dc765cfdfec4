//! Blog post entity model and DTOs.
//!
//! The block sequence is stored as a single JSONB column and always
//! written whole: there are no partial or per-block updates at the
//! persistence layer.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use verdia_core::content::block::Block;
use verdia_core::types::{DbId, Timestamp};

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub excerpt: String,
    pub featured_image: String,
    /// The ordered block sequence; order is render order.
    pub blocks: Json<Vec<Block>>,
    pub author: String,
    pub featured: bool,
    pub status: String,
    pub schema_version: i32,
    /// Optional author-facing publish date, distinct from `created_at`.
    pub date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new post.
///
/// `blocks` and `legacy_content` are mutually exclusive seeds: a post is
/// created with an explicit block sequence, or seeded from legacy
/// free-text content, or empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub blocks: Option<Vec<Block>>,
    pub legacy_content: Option<String>,
    pub author: String,
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub date: Option<Timestamp>,
}

/// DTO for updating an existing post. Absent fields are left unchanged;
/// a present `blocks` field overwrites the whole sequence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub blocks: Option<Vec<Block>>,
    pub author: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub date: Option<Timestamp>,
}

/// Response payload for server-side rendering of a post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPost {
    pub id: DbId,
    pub title: String,
    pub excerpt: String,
    pub featured_image: String,
    pub author: String,
    pub status: String,
    pub html: String,
}
