//! Content block schema and factory.
//!
//! Blocks are serialized flat with an internally-tagged `"type"`
//! discriminator so the persisted document reads
//! `{ "id": "...", "type": "heading", "level": 2, "text": "..." }`.
//! The discriminator determines which other fields are valid; the enum
//! makes it impossible to mix fields across variants.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Factory defaults
// ---------------------------------------------------------------------------

/// Default heading rank for a freshly created heading block.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Default column count for a freshly created gallery block.
pub const DEFAULT_GALLERY_COLUMNS: u8 = 2;

/// Default button label for a freshly created CTA block.
pub const DEFAULT_CTA_BUTTON_TEXT: &str = "Learn More";

/// Default button link for a freshly created CTA block.
pub const DEFAULT_CTA_BUTTON_LINK: &str = "/shop";

/// Valid heading ranks.
pub const VALID_HEADING_LEVELS: &[u8] = &[1, 2, 3];

/// Valid gallery column counts.
pub const VALID_GALLERY_COLUMNS: &[u8] = &[2, 3, 4];

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A single image inside a gallery block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A single entry inside a key-points block. Each entry carries its own id
/// so the editor can address it stably while the list is reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The variant-specific payload of a content block.
///
/// `Unknown` is not authorable: it captures any unrecognized `"type"` tag
/// on load so a document written by a newer editor still deserializes, and
/// the renderer drops it instead of failing. The foreign payload is not
/// preserved across a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockBody {
    /// Rich-text HTML content. Treated as an opaque, pre-sanitized string
    /// by the editor; the renderer sanitizes it again (see `sanitize`).
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default)]
        content: String,
    },

    #[serde(rename_all = "camelCase")]
    Heading {
        level: u8,
        #[serde(default)]
        text: String,
    },

    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Gallery {
        #[serde(default)]
        images: Vec<GalleryImage>,
        columns: u8,
    },

    #[serde(rename_all = "camelCase")]
    Video {
        #[serde(default)]
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// Weak references into the product catalog, resolved at render time.
    /// The block never embeds product data.
    #[serde(rename_all = "camelCase")]
    Products {
        #[serde(default)]
        product_ids: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    KeyPoints {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default)]
        points: Vec<KeyPoint>,
    },

    #[serde(rename_all = "camelCase")]
    Quote {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },

    /// Pure layout marker; no payload.
    Divider,

    #[serde(rename_all = "camelCase")]
    Cta {
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        button_text: String,
        #[serde(default)]
        button_link: String,
    },

    /// Catch-all for tags this version does not know about.
    #[serde(other)]
    Unknown,
}

/// A content block: a globally-unique id plus a variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(flatten)]
    pub body: BlockBody,
}

// ---------------------------------------------------------------------------
// Kind tags
// ---------------------------------------------------------------------------

/// The closed set of authorable block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    Heading,
    Image,
    Gallery,
    Video,
    Products,
    KeyPoints,
    Quote,
    Divider,
    Cta,
}

/// All authorable block kinds, in editor-palette order.
pub const ALL_BLOCK_KINDS: &[BlockKind] = &[
    BlockKind::Text,
    BlockKind::Heading,
    BlockKind::Image,
    BlockKind::Gallery,
    BlockKind::Video,
    BlockKind::Products,
    BlockKind::KeyPoints,
    BlockKind::Quote,
    BlockKind::Divider,
    BlockKind::Cta,
];

impl BlockKind {
    /// The wire tag for this kind, matching the serde `"type"` field.
    pub fn as_tag(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Heading => "heading",
            BlockKind::Image => "image",
            BlockKind::Gallery => "gallery",
            BlockKind::Video => "video",
            BlockKind::Products => "products",
            BlockKind::KeyPoints => "keyPoints",
            BlockKind::Quote => "quote",
            BlockKind::Divider => "divider",
            BlockKind::Cta => "cta",
        }
    }

    /// Parse a wire tag. Returns `None` for unrecognized tags; callers that
    /// want the legacy lenient behavior use [`Block::from_tag`] instead.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_BLOCK_KINDS.iter().copied().find(|k| k.as_tag() == tag)
    }

    /// Parse a wire tag, or fail with a validation error naming the valid set.
    pub fn try_from_tag(tag: &str) -> Result<Self, CoreError> {
        Self::from_tag(tag).ok_or_else(|| {
            let valid: Vec<&str> = ALL_BLOCK_KINDS.iter().map(|k| k.as_tag()).collect();
            CoreError::Validation(format!(
                "Invalid block type '{}'. Valid types: {}",
                tag,
                valid.join(", ")
            ))
        })
    }
}

impl BlockBody {
    /// The kind of this payload, or `None` for `Unknown`.
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            BlockBody::Text { .. } => Some(BlockKind::Text),
            BlockBody::Heading { .. } => Some(BlockKind::Heading),
            BlockBody::Image { .. } => Some(BlockKind::Image),
            BlockBody::Gallery { .. } => Some(BlockKind::Gallery),
            BlockBody::Video { .. } => Some(BlockKind::Video),
            BlockBody::Products { .. } => Some(BlockKind::Products),
            BlockBody::KeyPoints { .. } => Some(BlockKind::KeyPoints),
            BlockBody::Quote { .. } => Some(BlockKind::Quote),
            BlockBody::Divider => Some(BlockKind::Divider),
            BlockBody::Cta { .. } => Some(BlockKind::Cta),
            BlockBody::Unknown => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

fn mint_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Block {
    /// Construct a new block of the given kind with a freshly minted id and
    /// variant-appropriate empty defaults.
    pub fn new(kind: BlockKind) -> Self {
        let body = match kind {
            BlockKind::Text => BlockBody::Text {
                content: String::new(),
            },
            BlockKind::Heading => BlockBody::Heading {
                level: DEFAULT_HEADING_LEVEL,
                text: String::new(),
            },
            BlockKind::Image => BlockBody::Image {
                url: String::new(),
                alt: String::new(),
                caption: None,
            },
            BlockKind::Gallery => BlockBody::Gallery {
                images: Vec::new(),
                columns: DEFAULT_GALLERY_COLUMNS,
            },
            BlockKind::Video => BlockBody::Video {
                url: String::new(),
                title: None,
            },
            BlockKind::Products => BlockBody::Products {
                product_ids: Vec::new(),
                title: None,
            },
            BlockKind::KeyPoints => BlockBody::KeyPoints {
                title: None,
                points: Vec::new(),
            },
            BlockKind::Quote => BlockBody::Quote {
                text: String::new(),
                author: None,
            },
            BlockKind::Divider => BlockBody::Divider,
            BlockKind::Cta => BlockBody::Cta {
                title: String::new(),
                description: String::new(),
                button_text: DEFAULT_CTA_BUTTON_TEXT.to_string(),
                button_link: DEFAULT_CTA_BUTTON_LINK.to_string(),
            },
        };
        Block {
            id: mint_id(),
            body,
        }
    }

    /// Construct a new block from a wire tag. An unrecognized tag falls back
    /// to an empty text block; this matches the persisted documents produced
    /// by earlier versions of the editor and is deliberately not an error.
    pub fn from_tag(tag: &str) -> Self {
        Self::new(BlockKind::from_tag(tag).unwrap_or(BlockKind::Text))
    }

    /// Construct a new key-point entry with a freshly minted id.
    pub fn new_key_point(title: impl Into<String>) -> KeyPoint {
        KeyPoint {
            id: mint_id(),
            title: title.into(),
            description: None,
        }
    }

    /// Clone this block under a freshly minted id. The source is untouched
    /// and the copy never aliases it.
    pub fn duplicated(&self) -> Self {
        Block {
            id: mint_id(),
            body: self.body.clone(),
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.body.kind()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the enumerated fields of a single block (heading rank, gallery
/// column count). Free-text fields are not constrained here.
pub fn validate_block(block: &Block) -> Result<(), CoreError> {
    match &block.body {
        BlockBody::Heading { level, .. } => {
            if !VALID_HEADING_LEVELS.contains(level) {
                return Err(CoreError::Validation(format!(
                    "Invalid heading level {level}. Valid levels: 1, 2, 3"
                )));
            }
        }
        BlockBody::Gallery { columns, .. } => {
            if !VALID_GALLERY_COLUMNS.contains(columns) {
                return Err(CoreError::Validation(format!(
                    "Invalid gallery column count {columns}. Valid counts: 2, 3, 4"
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validate every block in a sequence.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), CoreError> {
    for block in blocks {
        validate_block(block)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
