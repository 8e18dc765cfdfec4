//! Pure renderer from an ordered block sequence to a display tree.
//!
//! `render_blocks` never reorders, deduplicates, or mutates its input; the
//! only blocks it drops are `Unknown` variants and product sections whose
//! references all fail to resolve. Rendering the same sequence twice
//! yields structurally identical output.

use crate::catalog::{format_price, ProductResolver};
use crate::content::block::{Block, BlockBody};
use crate::content::sanitize::sanitize_html;
use crate::content::video::{extract_youtube_id, youtube_embed_url};

// ---------------------------------------------------------------------------
// Display tree
// ---------------------------------------------------------------------------

/// A node in the rendered display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Plain text; escaped on HTML emission.
    Text(String),
    /// Pre-sanitized HTML; emitted verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Elements emitted without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Start building an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn child_if(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(n) => self.child(n),
            None => self,
        }
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::Text(value.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Serialize this node as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// Serialize a rendered sequence as HTML.
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// Escape text for HTML text and attribute positions.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Block rendering
// ---------------------------------------------------------------------------

/// Render an ordered block sequence to a display tree. Display order is
/// sequence order, always.
pub fn render_blocks(blocks: &[Block], products: &dyn ProductResolver) -> Vec<Node> {
    blocks
        .iter()
        .filter_map(|block| render_block(block, products))
        .collect()
}

/// Render one block, or `None` for blocks that produce no output
/// (unknown variants, product sections with nothing resolvable).
pub fn render_block(block: &Block, products: &dyn ProductResolver) -> Option<Node> {
    let node = match &block.body {
        BlockBody::Text { content } => el("div")
            .class("block-text")
            .child(Node::Raw(sanitize_html(content)))
            .into(),

        BlockBody::Heading { level, text } => {
            let tag = match level {
                1 => "h1",
                3 => "h3",
                _ => "h2",
            };
            el(tag).class("block-heading").text(text.clone()).into()
        }

        BlockBody::Image { url, alt, caption } => el("figure")
            .class("block-image")
            .child(el("img").attr("src", url.clone()).attr("alt", alt.clone()))
            .child_if(
                caption
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .map(|c| el("figcaption").text(c)),
            )
            .into(),

        BlockBody::Gallery { images, columns } => el("div")
            .class(format!("block-gallery gallery-cols-{columns}"))
            .children(images.iter().map(|image| {
                el("img")
                    .attr("src", image.url.clone())
                    .attr("alt", image.alt.clone())
                    .into()
            }))
            .into(),

        BlockBody::Video { url, title } => match extract_youtube_id(url) {
            Some(id) => el("figure")
                .class("block-video")
                .child(
                    el("iframe")
                        .attr("src", youtube_embed_url(id))
                        .attr("title", title.clone().unwrap_or_else(|| "Video".into()))
                        .attr("loading", "lazy")
                        .attr("allowfullscreen", "allowfullscreen"),
                )
                .into(),
            None => el("div")
                .class("block-video video-placeholder")
                .child(el("span").text(title.clone().unwrap_or_else(|| "Video unavailable".into())))
                .into(),
        },

        BlockBody::Products { product_ids, title } => {
            // Weak references: drop anything the catalog no longer knows.
            let resolved: Vec<_> = product_ids
                .iter()
                .filter_map(|id| products.resolve(id))
                .collect();
            if resolved.is_empty() {
                return None;
            }
            el("section")
                .class("block-products")
                .child_if(
                    title
                        .as_deref()
                        .filter(|t| !t.is_empty())
                        .map(|t| el("h2").text(t)),
                )
                .child(el("div").class("product-grid").children(resolved.iter().map(
                    |product| {
                        el("a")
                            .class("product-card")
                            .attr("href", format!("/shop/{}", product.id))
                            .child_if(
                                product
                                    .image_url
                                    .as_deref()
                                    .map(|url| el("img").attr("src", url).attr("alt", product.name.clone())),
                            )
                            .child(el("h3").text(product.name.clone()))
                            .child(
                                el("span")
                                    .class("product-price")
                                    .text(format_price(product.price_cents)),
                            )
                            .into()
                    },
                )))
                .into()
        }

        BlockBody::KeyPoints { title, points } => el("section")
            .class("block-keypoints")
            .child_if(
                title
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| el("h2").text(t)),
            )
            .child(
                el("ol").children(points.iter().enumerate().map(|(index, point)| {
                    el("li")
                        .class("keypoint-card")
                        .child(el("span").class("keypoint-number").text((index + 1).to_string()))
                        .child(el("h3").text(point.title.clone()))
                        .child_if(
                            point
                                .description
                                .as_deref()
                                .filter(|d| !d.is_empty())
                                .map(|d| el("p").text(d)),
                        )
                        .into()
                })),
            )
            .into(),

        BlockBody::Quote { text, author } => el("blockquote")
            .class("block-quote")
            .child(el("p").text(text.clone()))
            .child_if(author.as_deref().filter(|a| !a.is_empty()).map(|a| el("cite").text(a)))
            .into(),

        BlockBody::Divider => el("hr").class("block-divider").into(),

        BlockBody::Cta {
            title,
            description,
            button_text,
            button_link,
        } => el("div")
            .class("block-cta")
            .child(el("h3").text(title.clone()))
            .child(el("p").text(description.clone()))
            .child(
                el("a")
                    .class("cta-button")
                    .attr("href", button_link.clone())
                    .text(button_text.clone()),
            )
            .into(),

        BlockBody::Unknown => return None,
    };
    Some(node)
}

/// Render a sequence straight to HTML.
pub fn render_to_html(blocks: &[Block], products: &dyn ProductResolver) -> String {
    nodes_to_html(&render_blocks(blocks, products))
}

/// Collect the product ids referenced by a sequence's product blocks, in
/// first-seen order without duplicates. Used to bulk-resolve against the
/// catalog before rendering.
pub fn referenced_product_ids(blocks: &[Block]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();
    for block in blocks {
        if let BlockBody::Products { product_ids, .. } = &block.body {
            for id in product_ids {
                if seen.insert(id.as_str()) {
                    ids.push(id.clone());
                }
            }
        }
    }
    ids
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::ProductSummary;
    use crate::content::block::{Block, BlockBody, KeyPoint};
    use crate::content::editor::BlockEditor;

    fn no_products() -> HashMap<String, ProductSummary> {
        HashMap::new()
    }

    fn catalog() -> HashMap<String, ProductSummary> {
        let mut map = HashMap::new();
        map.insert(
            "monstera-deliciosa".to_string(),
            ProductSummary {
                id: "monstera-deliciosa".into(),
                name: "Monstera Deliciosa".into(),
                price_cents: 129_900,
                image_url: None,
            },
        );
        map
    }

    fn block(id: &str, body: BlockBody) -> Block {
        Block { id: id.into(), body }
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(e) => e,
            other => panic!("expected element, got {other:?}"),
        }
    }

    fn mixed_sequence() -> Vec<Block> {
        vec![
            block(
                "b1",
                BlockBody::Heading {
                    level: 1,
                    text: "Intro".into(),
                },
            ),
            block(
                "b2",
                BlockBody::Text {
                    content: "<p>hi</p>".into(),
                },
            ),
            block("b3", BlockBody::Divider),
            block(
                "b4",
                BlockBody::Cta {
                    title: "Visit us".into(),
                    description: "Plants await".into(),
                    button_text: "Shop".into(),
                    button_link: "/shop".into(),
                },
            ),
        ]
    }

    // -- purity and ordering -------------------------------------------------

    #[test]
    fn rendering_twice_is_idempotent() {
        let blocks = mixed_sequence();
        let resolver = no_products();
        let first = render_blocks(&blocks, &resolver);
        let second = render_blocks(&blocks, &resolver);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_post_renders_to_empty_tree() {
        let rendered = render_blocks(&[], &no_products());
        assert!(rendered.is_empty());
        assert_eq!(nodes_to_html(&rendered), "");
    }

    #[test]
    fn mixed_sequence_renders_in_order() {
        let rendered = render_blocks(&mixed_sequence(), &no_products());
        assert_eq!(rendered.len(), 4);
        assert_eq!(element(&rendered[0]).tag, "h1");
        assert_eq!(element(&rendered[1]).tag, "div");
        assert_eq!(element(&rendered[2]).tag, "hr");
        assert_eq!(element(&rendered[3]).tag, "div");
        // The divider is layout-only: no text anywhere beneath it.
        assert!(element(&rendered[2]).children.is_empty());
    }

    #[test]
    fn render_order_tracks_editor_moves() {
        let mut editor = BlockEditor::new(mixed_sequence());
        assert!(editor.move_block(0, 3));
        let rendered = render_blocks(editor.blocks(), &no_products());
        assert_eq!(element(&rendered[3]).tag, "h1");
        let mut reversed: Vec<Block> = editor.blocks().to_vec();
        reversed.reverse();
        editor.reorder(reversed);
        let rendered = render_blocks(editor.blocks(), &no_products());
        assert_eq!(element(&rendered[0]).tag, "h1");
    }

    // -- per-variant behavior ------------------------------------------------

    #[test]
    fn unknown_block_renders_nothing() {
        let blocks = vec![
            block("b1", BlockBody::Divider),
            block("b2", BlockBody::Unknown),
            block("b3", BlockBody::Divider),
        ];
        let rendered = render_blocks(&blocks, &no_products());
        assert_eq!(rendered.len(), 2);
    }

    #[test]
    fn text_block_is_sanitized_at_render_time() {
        let blocks = vec![block(
            "b1",
            BlockBody::Text {
                content: "<p>hi</p><script>alert(1)</script>".into(),
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("<p>hi</p>"));
        assert!(!html.contains("script"));
    }

    #[test]
    fn heading_level_selects_rank() {
        for (level, tag) in [(1u8, "h1"), (2, "h2"), (3, "h3")] {
            let rendered = render_blocks(
                &[block(
                    "h",
                    BlockBody::Heading {
                        level,
                        text: "t".into(),
                    },
                )],
                &no_products(),
            );
            assert_eq!(element(&rendered[0]).tag, tag);
        }
    }

    #[test]
    fn image_caption_is_conditional() {
        let without = block(
            "i1",
            BlockBody::Image {
                url: "/img/fern.jpg".into(),
                alt: "A fern".into(),
                caption: None,
            },
        );
        let with = block(
            "i2",
            BlockBody::Image {
                url: "/img/fern.jpg".into(),
                alt: "A fern".into(),
                caption: Some("Boston fern".into()),
            },
        );
        let html = render_block(&without, &no_products()).unwrap().to_html();
        assert!(!html.contains("figcaption"));
        let html = render_block(&with, &no_products()).unwrap().to_html();
        assert!(html.contains("<figcaption>Boston fern</figcaption>"));
    }

    #[test]
    fn gallery_grid_keyed_by_columns() {
        let blocks = vec![block(
            "g",
            BlockBody::Gallery {
                images: vec![
                    crate::content::block::GalleryImage {
                        url: "/a.jpg".into(),
                        alt: "a".into(),
                    },
                    crate::content::block::GalleryImage {
                        url: "/b.jpg".into(),
                        alt: "b".into(),
                    },
                ],
                columns: 3,
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("gallery-cols-3"));
        assert!(html.contains("alt=\"a\""));
        assert!(html.contains("alt=\"b\""));
    }

    #[test]
    fn unparseable_video_url_renders_placeholder() {
        let blocks = vec![block(
            "v",
            BlockBody::Video {
                url: "not-a-url".into(),
                title: None,
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("video-placeholder"));
        assert!(!html.contains("iframe"));
    }

    #[test]
    fn parseable_video_url_renders_embed() {
        let blocks = vec![block(
            "v",
            BlockBody::Video {
                url: "https://youtu.be/dQw4w9WgXcQ".into(),
                title: Some("Repotting 101".into()),
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(html.contains("Repotting 101"));
    }

    #[test]
    fn products_block_drops_unresolved_references() {
        let blocks = vec![block(
            "p",
            BlockBody::Products {
                product_ids: vec!["monstera-deliciosa".into(), "deleted-product".into()],
                title: Some("Featured".into()),
            },
        )];
        let html = render_to_html(&blocks, &catalog());
        assert!(html.contains("Monstera Deliciosa"));
        assert!(!html.contains("deleted-product"));
    }

    #[test]
    fn products_block_with_nothing_resolved_renders_nothing() {
        let blocks = vec![block(
            "p",
            BlockBody::Products {
                product_ids: vec!["deleted-product".into()],
                title: None,
            },
        )];
        assert!(render_blocks(&blocks, &no_products()).is_empty());
    }

    #[test]
    fn key_points_are_numbered_and_description_optional() {
        let blocks = vec![block(
            "k",
            BlockBody::KeyPoints {
                title: Some("Care basics".into()),
                points: vec![
                    KeyPoint {
                        id: "p1".into(),
                        title: "Light".into(),
                        description: Some("Bright, indirect".into()),
                    },
                    KeyPoint {
                        id: "p2".into(),
                        title: "Water".into(),
                        description: None,
                    },
                ],
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("Care basics"));
        assert!(html.contains("keypoint-number\">1</span>"));
        assert!(html.contains("keypoint-number\">2</span>"));
        assert!(html.contains("Bright, indirect"));
    }

    #[test]
    fn quote_attribution_is_conditional() {
        let anonymous = block(
            "q1",
            BlockBody::Quote {
                text: "Grow slow".into(),
                author: None,
            },
        );
        assert!(!render_block(&anonymous, &no_products())
            .unwrap()
            .to_html()
            .contains("cite"));
        let attributed = block(
            "q2",
            BlockBody::Quote {
                text: "Grow slow".into(),
                author: Some("A gardener".into()),
            },
        );
        let html = render_block(&attributed, &no_products()).unwrap().to_html();
        assert!(html.contains("<cite>A gardener</cite>"));
    }

    #[test]
    fn text_nodes_escape_html() {
        let blocks = vec![block(
            "h",
            BlockBody::Heading {
                level: 2,
                text: "Ferns & <friends>".into(),
            },
        )];
        let html = render_to_html(&blocks, &no_products());
        assert!(html.contains("Ferns &amp; &lt;friends&gt;"));
    }

    // -- reference collection ------------------------------------------------

    #[test]
    fn referenced_product_ids_dedupes_in_order() {
        let blocks = vec![
            block(
                "p1",
                BlockBody::Products {
                    product_ids: vec!["b".into(), "a".into()],
                    title: None,
                },
            ),
            block(
                "p2",
                BlockBody::Products {
                    product_ids: vec!["a".into(), "c".into()],
                    title: None,
                },
            ),
        ];
        assert_eq!(referenced_product_ids(&blocks), vec!["b", "a", "c"]);
    }
}
