//! Blog post validation, status constants, and legacy-content seeding.
//!
//! This module lives in `core` (zero internal deps beyond the content
//! model) so it can be used by both the API/repository layer and any
//! future CLI tooling.

use crate::content::block::{Block, BlockBody};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

/// All valid post statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

/// Version tag written into every persisted post document. Bump when the
/// block schema changes shape.
pub const POST_SCHEMA_VERSION: i32 = 1;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of posts per listing page.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of posts per listing page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit into [1, max], falling back to the default.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a post title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > 200 {
        return Err(CoreError::Validation(
            "Title must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a post excerpt (<= 500 chars).
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    if excerpt.len() > 500 {
        return Err(CoreError::Validation(
            "Excerpt must be at most 500 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a post author (non-empty, <= 100 chars).
pub fn validate_author(author: &str) -> Result<(), CoreError> {
    if author.trim().is_empty() {
        return Err(CoreError::Validation("Author must not be empty".into()));
    }
    if author.len() > 100 {
        return Err(CoreError::Validation(
            "Author must be at most 100 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a post status against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if !VALID_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{}'. Valid statuses: {}",
            status,
            VALID_STATUSES.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Legacy content seeding
// ---------------------------------------------------------------------------

/// Seed a block sequence from legacy free-text post content: a single text
/// block carrying the old body, or an empty sequence if there was none.
pub fn seed_from_legacy(content: &str) -> Vec<Block> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let mut block = Block::from_tag("text");
    block.body = BlockBody::Text {
        content: content.to_string(),
    };
    vec![block]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_title ------------------------------------------------------

    #[test]
    fn title_valid() {
        assert!(validate_title("Repotting Your Monstera").is_ok());
    }

    #[test]
    fn title_empty_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_too_long_rejected() {
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    // -- validate_excerpt ----------------------------------------------------

    #[test]
    fn excerpt_empty_is_fine() {
        assert!(validate_excerpt("").is_ok());
    }

    #[test]
    fn excerpt_too_long_rejected() {
        assert!(validate_excerpt(&"a".repeat(501)).is_err());
    }

    // -- validate_author -----------------------------------------------------

    #[test]
    fn author_valid() {
        assert!(validate_author("Priya").is_ok());
    }

    #[test]
    fn author_empty_rejected() {
        assert!(validate_author(" ").is_err());
    }

    // -- validate_status -----------------------------------------------------

    #[test]
    fn status_valid() {
        assert!(validate_status("draft").is_ok());
        assert!(validate_status("published").is_ok());
    }

    #[test]
    fn status_invalid() {
        assert!(validate_status("archived").is_err());
    }

    // -- pagination ----------------------------------------------------------

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    // -- legacy seeding ------------------------------------------------------

    #[test]
    fn legacy_content_seeds_single_text_block() {
        let blocks = seed_from_legacy("<p>Old post body</p>");
        assert_eq!(blocks.len(), 1);
        assert!(
            matches!(&blocks[0].body, crate::content::block::BlockBody::Text { content }
                if content == "<p>Old post body</p>")
        );
    }

    #[test]
    fn empty_legacy_content_seeds_nothing() {
        assert!(seed_from_legacy("   ").is_empty());
    }
}
